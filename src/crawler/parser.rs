//! Listing page extraction
//!
//! This module pulls event rows and pagination links out of a search-result
//! page. Every field of a row is parsed independently: a price, time or id
//! that fails to parse is logged and left at its zero value, and the row is
//! still returned.

use crate::crawler::fetcher::Document;
use crate::crawler::fields::{parse_id, parse_price, parse_time};
use crate::model::Event;
use crate::ParseError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

const SELECTOR_EVENTS: &str = ".content.block-group.chatterbox-margin";
const SELECTOR_TITLE_LINK: &str = "h2 a";
const SELECTOR_PRICE: &str = ".searchResultsPrice strong";
const SELECTOR_VENUE_DETAILS: &str = ".venue-details h4";
const SELECTOR_NEXT_PAGE: &str = ".pagination_link_text.nextlink";
const SELECTOR_PREV_PAGE: &str = ".pagination_link_text.prevlink";

/// Everything the crawler needs from one listing page
///
/// Owned data only, so the DOM can be dropped before any await point.
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Events in document order
    pub events: Vec<Event>,

    /// Raw href of the "next page" control, None on the last page
    pub next_page: Option<String>,

    /// Raw href of the "previous page" control, None on the first page
    pub prev_page: Option<String>,

    /// Number of fields that failed to parse on this page
    pub field_errors: usize,
}

/// The venue-details block of a row, by named slot
///
/// The markup carries no labels: the first node is the venue name and the
/// second is the start time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueDetails {
    pub venue: Option<String>,
    pub raw_time: Option<String>,
}

impl VenueDetails {
    fn from_texts(texts: impl IntoIterator<Item = String>) -> Self {
        let mut texts = texts.into_iter();
        Self {
            venue: texts.next(),
            raw_time: texts.next(),
        }
    }
}

struct Selectors {
    events: Selector,
    title_link: Selector,
    price: Selector,
    venue_details: Selector,
    next_page: Selector,
    prev_page: Selector,
}

impl Selectors {
    fn compile() -> Option<Self> {
        Some(Self {
            events: Selector::parse(SELECTOR_EVENTS).ok()?,
            title_link: Selector::parse(SELECTOR_TITLE_LINK).ok()?,
            price: Selector::parse(SELECTOR_PRICE).ok()?,
            venue_details: Selector::parse(SELECTOR_VENUE_DETAILS).ok()?,
            next_page: Selector::parse(SELECTOR_NEXT_PAGE).ok()?,
            prev_page: Selector::parse(SELECTOR_PREV_PAGE).ok()?,
        })
    }
}

/// Extracts events and pagination links from listing documents
pub struct ListingExtractor {
    event_base_url: String,
    selectors: Option<Selectors>,
}

impl ListingExtractor {
    /// Creates an extractor for a site whose detail links start with `event_base_url`
    pub fn new(event_base_url: impl Into<String>) -> Self {
        Self {
            event_base_url: event_base_url.into(),
            selectors: Selectors::compile(),
        }
    }

    /// Extracts the whole listing page
    ///
    /// # Arguments
    ///
    /// * `document` - A loaded search-result page
    ///
    /// # Returns
    ///
    /// A [`ListingPage`] holding the events in document order, the raw
    /// next/previous page hrefs and the number of fields that failed to
    /// parse. Rows with bad fields are kept with those fields zeroed.
    pub fn extract(&self, document: &Document) -> ListingPage {
        let html = document.html();
        let (events, field_errors) = self.extract_events(html);

        ListingPage {
            events,
            next_page: self.next_page_link(html),
            prev_page: self.prev_page_link(html),
            field_errors,
        }
    }

    /// Extracts every event row in document order
    ///
    /// Returns the events and the number of fields that failed to parse.
    /// A page without rows yields an empty list.
    pub fn extract_events(&self, html: &Html) -> (Vec<Event>, usize) {
        let Some(selectors) = &self.selectors else {
            tracing::error!("Listing selectors failed to compile");
            return (Vec::new(), 0);
        };

        let mut field_errors = 0;
        let events = html
            .select(&selectors.events)
            .map(|row| {
                let (event, errors) = self.extract_row(selectors, row);
                for error in &errors {
                    tracing::warn!("Error parsing field for event {}: {}", event.id, error);
                }
                if !event.is_complete() {
                    tracing::warn!("Event row {:?} has no usable detail link", event.title);
                }
                field_errors += errors.len();
                event
            })
            .collect();

        (events, field_errors)
    }

    /// Returns the href of the "next page" control, if the page has one
    pub fn next_page_link(&self, html: &Html) -> Option<String> {
        let selectors = self.selectors.as_ref()?;
        first_href(html, &selectors.next_page)
    }

    /// Returns the href of the "previous page" control, if the page has one
    pub fn prev_page_link(&self, html: &Html) -> Option<String> {
        let selectors = self.selectors.as_ref()?;
        first_href(html, &selectors.prev_page)
    }

    fn extract_row(&self, selectors: &Selectors, row: ElementRef) -> (Event, Vec<ParseError>) {
        let mut errors = Vec::new();

        let title_link = row.select(&selectors.title_link).next();
        let title = title_link.map(element_text).unwrap_or_default();
        let link = title_link
            .and_then(|a| a.value().attr("href"))
            .map(|href| self.absolute_link(href))
            .unwrap_or_default();

        let id = parse_id(&link, &self.event_base_url).unwrap_or_else(|e| {
            errors.push(e);
            0
        });

        let raw_price = row
            .select(&selectors.price)
            .map(element_text)
            .collect::<Vec<_>>()
            .join(" ");
        let price = parse_price(&raw_price).unwrap_or_else(|e| {
            errors.push(e);
            0.0
        });

        let details = VenueDetails::from_texts(row.select(&selectors.venue_details).map(element_text));
        let time = details.raw_time.as_deref().and_then(|raw| {
            parse_time(raw).map_err(|e| errors.push(e)).ok()
        });

        let event = Event {
            artist: title.clone(),
            city: String::new(),
            venue: details.venue.unwrap_or_default(),
            time,
            price,
            title,
            link,
            id,
        };

        (event, errors)
    }

    /// Makes a detail link absolute against the site's event base URL
    fn absolute_link(&self, href: &str) -> String {
        let href = href.trim();
        if Url::parse(href).is_ok() {
            return href.to_string();
        }

        Url::parse(&self.event_base_url)
            .and_then(|base| base.join(href))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| href.to_string())
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_href(html: &Html, selector: &Selector) -> Option<String> {
    html.select(selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(str::to_string)
}

//! Extracts a `ScholarProfile` from the HTML of a public citation profile page.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::models::scholar::{Publication, ScholarProfile, UNKNOWN};
use crate::scholar::ScholarError;

/// Only the first rows of the publication table are read.
pub const MAX_PUBLICATIONS: usize = 10;

macro_rules! selector {
    ($name:ident, $css:literal) => {
        static $name: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse($css).expect(concat!("selector is valid: ", $css)));
    };
}

selector!(NAME, "#gsc_prf_in");
selector!(AFFILIATION, "#gsc_prf_inw + .gsc_prf_il");
selector!(INTERESTS, "#gsc_prf_int .gsc_prf_inta");
selector!(METRICS_TABLE, "#gsc_rsb_st");
selector!(CITATIONS_ALL, "#gsc_rsb_st tbody tr:first-child td:nth-child(2)");
selector!(H_INDEX_ALL, "#gsc_rsb_st tbody tr:nth-child(2) td:nth-child(2)");
selector!(I10_INDEX_ALL, "#gsc_rsb_st tbody tr:nth-child(3) td:nth-child(2)");
selector!(PUBLICATION_TABLE, "#gsc_a_b");
selector!(PUBLICATION_ROW, "#gsc_a_b .gsc_a_tr");
selector!(PUBLICATION_TITLE, ".gsc_a_at");
selector!(PUBLICATION_YEAR, ".gsc_a_y");
selector!(PUBLICATION_CITATIONS, ".gsc_a_c a");

pub fn parse_profile_html(html: &str) -> Result<ScholarProfile, ScholarError> {
    let doc = Html::parse_document(html);

    let looks_like_profile = [&*NAME, &*METRICS_TABLE, &*PUBLICATION_TABLE]
        .into_iter()
        .any(|sel| doc.select(sel).next().is_some());
    if !looks_like_profile {
        return Err(ScholarError::Parse(
            "no profile header, metrics table or publication list".to_string(),
        ));
    }

    let name = first_text(&doc, &NAME).unwrap_or_else(|| UNKNOWN.to_string());
    let affiliation = first_text(&doc, &AFFILIATION).unwrap_or_else(|| UNKNOWN.to_string());

    let research_interests = doc
        .select(&INTERESTS)
        .map(element_text)
        .filter(|interest| !interest.is_empty())
        .collect();

    let metric = |sel: &Selector| first_text(&doc, sel).map_or(0, |t| parse_leading_int(&t));

    let publications = doc
        .select(&PUBLICATION_ROW)
        .take(MAX_PUBLICATIONS)
        .filter_map(parse_publication_row)
        .collect();

    Ok(ScholarProfile {
        name,
        affiliation,
        research_interests,
        publications,
        total_citations: metric(&*CITATIONS_ALL),
        h_index: metric(&*H_INDEX_ALL),
        i10_index: metric(&*I10_INDEX_ALL),
    })
}

/// Authors and venue are the first two elements following the title link.
fn parse_publication_row(row: ElementRef<'_>) -> Option<Publication> {
    let title_el = row.select(&PUBLICATION_TITLE).next()?;
    let title = element_text(title_el);
    if title.is_empty() {
        return None;
    }

    let mut following = title_el.next_siblings().filter_map(ElementRef::wrap);
    let authors = following.next().map(element_text).unwrap_or_default();
    let venue = following.next().map(element_text).unwrap_or_default();

    let year = row
        .select(&PUBLICATION_YEAR)
        .next()
        .map(element_text)
        .unwrap_or_default();
    let citations = row
        .select(&PUBLICATION_CITATIONS)
        .next()
        .map_or(0, |el| parse_leading_int(&element_text(el)));

    Some(Publication {
        title,
        authors,
        venue,
        year,
        citations,
    })
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_text(doc: &Html, sel: &Selector) -> Option<String> {
    let text = element_text(doc.select(sel).next()?);
    (!text.is_empty()).then_some(text)
}

/// Integer from the leading digits, 0 when there are none.
fn parse_leading_int(text: &str) -> u32 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

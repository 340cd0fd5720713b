// src/extractors/rich.rs
//! Field extractors for the section-labelled layout.
//!
//! Each extractor takes the region it works on as an `Option` and returns its
//! own default when the region is missing, so a page lacking any block still
//! produces a record.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Html, Selector};

use crate::extractors::classify::{ABOUT_RE, COURSES_RE};
use crate::extractors::document::{
    content_container, find_all_by_text, find_by_text, next_element_sibling, own_string,
    region_text, value_after_colon, DIV_SELECTOR, GROUP_SELECTOR, P_SELECTOR,
};
use crate::extractors::record::ExtractedRecord;

static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1").expect("Failed to compile H1_SELECTOR")
});

static HEAD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.head").expect("Failed to compile HEAD_SELECTOR")
});

static BR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("br").expect("Failed to compile BR_SELECTOR")
});

static WHOS_WHO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("Whos Who").expect("Failed to compile WHOS_WHO_RE")
});

static ESTABLISHMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("Establishment").expect("Failed to compile ESTABLISHMENT_RE")
});

static INSTITUTION_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("Institution Type").expect("Failed to compile INSTITUTION_TYPE_RE")
});

static PIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("Pin").expect("Failed to compile PIN_RE")
});

static INFORMATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("Information").expect("Failed to compile INFORMATION_RE")
});

/// "<digits> <word>", e.g. "60 seats". Group 1 is the count.
static SEATS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)\s\w+").expect("Failed to compile SEATS_RE")
});

/// Program details pulled from the course block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseInfo {
    pub has_graduate_programs: Option<bool>,
    pub has_target_program: Option<bool>,
    pub target_program_seat_count: Option<u64>,
    pub total_seat_count: Option<i64>,
}

/// Extracts every field of a rich-layout page.
pub fn extract_rich(document: &Html, source_url: &str) -> ExtractedRecord {
    let container = content_container(document);

    let heading = container
        .select(&H1_SELECTOR)
        .next()
        .or_else(|| container.select(&HEAD_SELECTOR).next());
    let (title, district, state) = match heading {
        Some(_) => title_and_place(heading),
        None => {
            tracing::debug!("No heading on {}, using the URL as title", source_url);
            (Some(source_url.to_string()), None, None)
        }
    };

    let about = find_by_text(container, &DIV_SELECTOR, &ABOUT_RE);
    let (establishment_year, institution_type) = about_info(about);

    let postal_code = postal_code(container.select(&GROUP_SELECTOR).next());

    let accreditation_status = accreditation_status(&region_text(container).to_lowercase());

    let courses = find_all_by_text(container, &DIV_SELECTOR, &COURSES_RE);
    let course = course_info(&courses);

    let who = find_by_text(container, &DIV_SELECTOR, &WHOS_WHO_RE);
    let head_of_institution = head_of_institution(who);

    ExtractedRecord {
        title,
        district,
        state,
        establishment_year,
        institution_type,
        postal_code,
        accreditation_status,
        has_graduate_programs: course.has_graduate_programs,
        has_target_program: course.has_target_program,
        target_program_seat_count: course.target_program_seat_count,
        total_seat_count: course.total_seat_count,
        head_of_institution,
        source_url: source_url.to_string(),
    }
}

/// Splits "Name, District, State" into its parts.
pub fn title_and_place(
    heading: Option<ElementRef<'_>>,
) -> (Option<String>, Option<String>, Option<String>) {
    let Some(heading) = heading else {
        return (None, None, None);
    };

    let text = region_text(heading);
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();

    fn non_empty(s: &str) -> Option<String> {
        (!s.is_empty()).then(|| s.to_string())
    }

    match parts.as_slice() {
        &[title, district, state] => (non_empty(title), non_empty(district), non_empty(state)),
        &[title, district] => (non_empty(title), non_empty(district), None),
        parts => (parts.first().and_then(|t| non_empty(t)), None, None),
    }
}

/// Establishment year and institution type from the block after the "About" label.
pub fn about_info(about: Option<ElementRef<'_>>) -> (Option<String>, Option<String>) {
    let Some(block) = about.and_then(next_element_sibling) else {
        return (None, None);
    };

    let labelled = |re: &Regex| {
        find_by_text(block, &P_SELECTOR, re)
            .and_then(own_string)
            .and_then(|line| value_after_colon(&line))
    };

    (labelled(&*ESTABLISHMENT_RE), labelled(&*INSTITUTION_TYPE_RE))
}

/// Postal code from the "Pin" line of the info block.
pub fn postal_code(info: Option<ElementRef<'_>>) -> Option<String> {
    let info = info?;
    find_by_text(info, &P_SELECTOR, &PIN_RE)
        .and_then(own_string)
        .and_then(|line| value_after_colon(&line))
}

/// `true` when the lower-cased page text mentions "aicte".
///
/// Whether "approved" also appears is not checked. Downstream data was
/// produced with this rule, so it stays a single substring test.
pub fn accreditation_status(lowered_text: &str) -> Option<bool> {
    if lowered_text.is_empty() {
        return None;
    }
    Some(lowered_text.contains("aicte"))
}

/// Program flags and seat counts from the block after the first "Courses" label.
pub fn course_info(courses: &[ElementRef<'_>]) -> CourseInfo {
    let Some(block) = courses.first().copied().and_then(next_element_sibling) else {
        return CourseInfo::default();
    };

    let text = region_text(block).to_lowercase();
    let has_graduate_programs = text.contains("master");

    // Target-program detection has always reported true for this layout.
    let has_target_program = true;

    let target_program_seat_count = find_by_text(block, &P_SELECTOR, &INFORMATION_RE)
        .and_then(own_string)
        .and_then(|line| first_seat_count(&line));

    let counts: Vec<i64> = SEATS_RE
        .captures_iter(&text)
        .filter_map(|caps| parse_seat_count::<i64>(&caps[1]))
        .collect();
    let total_seat_count = if counts.is_empty() {
        None
    } else {
        let all = counts.iter().fold(0i64, |acc, n| acc.saturating_add(*n));
        let target = target_program_seat_count
            .map(|n| i64::try_from(n).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Some(all.saturating_sub(target))
    };

    CourseInfo {
        has_graduate_programs: Some(has_graduate_programs),
        has_target_program: Some(has_target_program),
        target_program_seat_count,
        total_seat_count,
    }
}

fn first_seat_count(line: &str) -> Option<u64> {
    SEATS_RE
        .captures(line)
        .and_then(|caps| parse_seat_count::<u64>(&caps[1]))
}

/// Counts too large for the target type are skipped.
fn parse_seat_count<T: std::str::FromStr>(digits: &str) -> Option<T> {
    match digits.parse::<T>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::debug!("Seat count '{}' does not fit, skipping it", digits);
            None
        }
    }
}

/// Name that follows the first line break of the "Whos Who" block.
pub fn head_of_institution(who: Option<ElementRef<'_>>) -> Option<String> {
    let block = who.and_then(next_element_sibling)?;
    let br = block.select(&BR_SELECTOR).next()?;
    let after = br.next_sibling()?;

    let text = match after.value() {
        Node::Text(text) => text.text.to_string(),
        Node::Element(_) => ElementRef::wrap(after).map(region_text)?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

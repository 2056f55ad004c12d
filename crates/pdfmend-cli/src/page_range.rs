/// Parse a 1-based page selection such as `"1,3-5"` into sorted, distinct
/// 0-based page indices.
///
/// Empty items are ignored, so `"2,"` selects page 2. A reversed range
/// (`"5-3"`), page 0 and pages past `page_count` are errors.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();

    for item in input.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        match item.split_once('-') {
            Some((start, end)) => {
                let start = parse_page(start, page_count)?;
                let end = parse_page(end, page_count)?;
                if start > end {
                    return Err(format!("invalid page range '{item}' (start after end)"));
                }
                pages.extend(start - 1..end);
            }
            None => pages.push(parse_page(item, page_count)? - 1),
        }
    }

    if pages.is_empty() {
        return Err(format!("no pages selected by '{input}'"));
    }
    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

/// A single 1-based page number within `1..=page_count`.
fn parse_page(text: &str, page_count: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    if page > page_count {
        return Err(format!(
            "page {page} exceeds document page count ({page_count})"
        ));
    }
    Ok(page)
}

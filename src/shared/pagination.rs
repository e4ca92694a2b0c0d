use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared::constants::PAGINATION_ELLIPSIS;

/// One slot of a pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(n) => serializer.serialize_u32(*n),
            PageItem::Ellipsis => serializer.serialize_str(PAGINATION_ELLIPSIS),
        }
    }
}

impl<'de> Deserialize<'de> for PageItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Page(u32),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Page(n) => Ok(PageItem::Page(n)),
            Raw::Marker(marker) if marker == PAGINATION_ELLIPSIS => Ok(PageItem::Ellipsis),
            Raw::Marker(marker) => Err(D::Error::custom(format!(
                "unexpected page marker: {}",
                marker
            ))),
        }
    }
}

pub fn total_pages(total_elements: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_elements.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Page numbers (1-based) and ellipsis markers to render around `current_page`.
///
/// First and last page are always present. `sibling_count` pages are shown on
/// each side of the current one; a gap towards either boundary collapses into a
/// single ellipsis. When every page fits into the window budget
/// (`sibling_count + 5` slots) all pages are listed.
pub fn pagination_range(
    current_page: u32,
    total_elements: u64,
    page_size: u32,
    sibling_count: u32,
) -> Vec<PageItem> {
    let total = total_pages(total_elements, page_size);
    if total == 0 {
        return Vec::new();
    }

    let budget = sibling_count.saturating_add(5);
    if budget >= total {
        return pages(1, total);
    }

    let current = current_page.clamp(1, total);
    let left_sibling = current.saturating_sub(sibling_count).max(1);
    let right_sibling = current.saturating_add(sibling_count).min(total);

    let show_left_dots = left_sibling > 2;
    let show_right_dots = right_sibling < total.saturating_sub(2);
    let edge_count = sibling_count.saturating_mul(2).saturating_add(3);

    match (show_left_dots, show_right_dots) {
        (false, true) => {
            let left_end = edge_count.min(total);
            if left_end + 1 >= total {
                return pages(1, total);
            }
            let mut items = pages(1, left_end);
            items.push(PageItem::Ellipsis);
            items.push(PageItem::Page(total));
            items
        }
        (true, false) => {
            let right_start = (total + 1).saturating_sub(edge_count);
            if right_start <= 2 {
                return pages(1, total);
            }
            let mut items = vec![PageItem::Page(1), PageItem::Ellipsis];
            items.extend(pages(right_start, total));
            items
        }
        (true, true) => {
            let mut items = vec![PageItem::Page(1), PageItem::Ellipsis];
            items.extend(pages(left_sibling, right_sibling));
            items.push(PageItem::Ellipsis);
            items.push(PageItem::Page(total));
            items
        }
        (false, false) => pages(1, total),
    }
}

fn pages(start: u32, end: u32) -> Vec<PageItem> {
    (start..=end).map(PageItem::Page).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(95, 10), 10);
        assert_eq!(total_pages(100, 10), 10);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_first_page_of_ten() {
        let range = pagination_range(1, 95, 10, 1);
        assert_eq!(
            range,
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert!(!range.contains(&Page(0)));
        assert!(!range.contains(&Page(11)));
    }

    #[test]
    fn test_middle_page_has_both_ellipses() {
        assert_eq!(
            pagination_range(5, 95, 10, 1),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_last_page() {
        assert_eq!(
            pagination_range(10, 95, 10, 1),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_small_total_lists_every_page() {
        assert_eq!(
            pagination_range(2, 55, 10, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6)]
        );
        assert_eq!(pagination_range(1, 3, 10, 1), vec![Page(1)]);
    }

    #[test]
    fn test_no_elements_yields_empty_range() {
        assert!(pagination_range(1, 0, 10, 1).is_empty());
    }

    #[test]
    fn test_out_of_range_current_page_is_clamped() {
        assert_eq!(pagination_range(42, 95, 10, 1), pagination_range(10, 95, 10, 1));
        assert_eq!(pagination_range(0, 95, 10, 1), pagination_range(1, 95, 10, 1));
    }

    #[test]
    fn test_wider_sibling_window() {
        assert_eq!(
            pagination_range(10, 200, 10, 2),
            vec![
                Page(1),
                Ellipsis,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Ellipsis,
                Page(20)
            ]
        );
    }

    #[test]
    fn test_oversized_sibling_count_never_leaves_range() {
        let range = pagination_range(13, 160, 10, 10);
        assert_eq!(range, pages(1, 16));
    }

    #[test]
    fn test_serializes_ellipsis_as_string() {
        let json = serde_json::to_string(&vec![Page(1), Ellipsis, Page(9)]).unwrap();
        assert_eq!(json, r#"[1,"...",9]"#);

        let items: Vec<PageItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(items, vec![Page(1), Ellipsis, Page(9)]);
        assert!(serde_json::from_str::<Vec<PageItem>>(r#"["…"]"#).is_err());
    }
}

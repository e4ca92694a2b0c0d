use serde::{Deserialize, Serialize};

/// Paginated envelope returned by the catalog API list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub pageable: Pageable,
    pub last: bool,
    pub total_elements: i64,
    pub total_pages: i64,
    pub size: i64,
    pub number: i64,
    pub first: bool,
    pub number_of_elements: i64,
    pub empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page_number: i64,
    pub page_size: i64,
    pub offset: i64,
    pub paged: bool,
    pub unpaged: bool,
}

impl<T> Page<T> {
    /// Envelope with no content, used when a list cannot be fetched
    pub fn empty(size: u32) -> Self {
        let size = i64::from(size);
        Self {
            content: Vec::new(),
            pageable: Pageable {
                page_number: 0,
                page_size: size,
                offset: 0,
                paged: true,
                unpaged: false,
            },
            last: true,
            total_elements: 0,
            total_pages: 0,
            size,
            number: 0,
            first: true,
            number_of_elements: 0,
            empty: true,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            pageable: self.pageable,
            last: self.last,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            first: self.first,
            number_of_elements: self.number_of_elements,
            empty: self.empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_spring_envelope() {
        let page: Page<i64> = serde_json::from_value(json!({
            "content": [1, 2],
            "pageable": {
                "pageNumber": 0,
                "pageSize": 2,
                "offset": 0,
                "paged": true,
                "unpaged": false,
                "sort": { "sorted": false }
            },
            "last": false,
            "totalElements": 5,
            "totalPages": 3,
            "size": 2,
            "number": 0,
            "first": true,
            "numberOfElements": 2,
            "empty": false
        }))
        .unwrap();

        assert_eq!(page.content, vec![1, 2]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.pageable.page_size, 2);
    }

    #[test]
    fn test_empty_page() {
        let page: Page<String> = Page::empty(25);
        assert!(page.empty && page.first && page.last);
        assert_eq!(page.size, 25);
        assert_eq!(page.pageable.page_size, 25);
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn test_map_keeps_envelope() {
        let mut page: Page<i64> = Page::empty(10);
        page.content = vec![1, 2, 3];
        page.total_elements = 3;

        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.content, vec![10, 20, 30]);
        assert_eq!(mapped.total_elements, 3);
    }
}

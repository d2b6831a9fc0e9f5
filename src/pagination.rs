use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One page of a backend collection. `page` is 0-indexed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Paging and ordering parameters forwarded to collection endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: Option<SortDirection>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    /// A zero `size` falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: usize, size: usize) -> Self {
        let size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
        Self {
            page,
            size,
            sort_by: None,
            sort_dir: None,
        }
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_dir = Some(direction);
        self
    }

    /// Query parameters in the order the backend documents them.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some(sort_by) = self.sort_by.as_deref().filter(|s| !s.trim().is_empty()) {
            query.push(("sortBy".to_string(), sort_by.trim().to_string()));
            query.push((
                "sortDir".to_string(),
                self.sort_dir.unwrap_or_default().as_str().to_string(),
            ));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_without_sort() {
        let query = PageRequest::new(2, 50).to_query();
        assert_eq!(
            query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn query_with_sort_defaults_direction() {
        let mut request = PageRequest::new(0, 20);
        request.sort_by = Some("name".to_string());
        let query = request.to_query();
        assert!(query.contains(&("sortBy".to_string(), "name".to_string())));
        assert!(query.contains(&("sortDir".to_string(), "asc".to_string())));
    }

    #[test]
    fn zero_size_uses_default() {
        assert_eq!(PageRequest::new(0, 0).size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_map_keeps_metadata() {
        let page = Page {
            content: vec![1, 2, 3],
            page: 1,
            size: 3,
            total_elements: 6,
            total_pages: 2,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.content, vec![10, 20, 30]);
        assert_eq!(mapped.page, 1);
        assert_eq!(mapped.total_pages, 2);
    }
}

//! In-memory search and sort for list screens.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction of a list column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A record that can be shown in a searchable, sortable list.
pub trait Listable {
    type SortField: Copy + Eq;

    /// Values matched by the free-text search. `None` never matches.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Value compared when sorting by `field`. `None` sorts as `""`.
    fn sort_value(&self, field: Self::SortField) -> Option<&str>;
}

/// Search text plus sort column for one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub search: String,
    pub sort_by: F,
    pub direction: SortDirection,
}

impl<F: Copy + Eq> ListQuery<F> {
    /// An unfiltered query sorted ascending on `sort_by`.
    pub fn new(sort_by: F) -> Self {
        Self {
            search: String::new(),
            sort_by,
            direction: SortDirection::Asc,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Column-header click: flips the direction when `field` is already the
    /// ascending sort column, otherwise sorts ascending on `field`.
    pub fn toggle_sort(&mut self, field: F) {
        let flip = self.sort_by == field && self.direction == SortDirection::Asc;
        self.direction = if flip {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.sort_by = field;
    }

    /// Whether `item` passes the search filter.
    pub fn matches<T: Listable<SortField = F>>(&self, item: &T) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        item.search_fields()
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(&needle))
    }

    /// Filters and sorts `items`. Equal keys keep their input order.
    pub fn apply<'a, T: Listable<SortField = F>>(&self, items: &'a [T]) -> Vec<&'a T> {
        let mut visible: Vec<&T> = items.iter().filter(|item| self.matches(*item)).collect();
        visible.sort_by(|a, b| {
            let ordering = compare(a.sort_value(self.sort_by), b.sort_value(self.sort_by));
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        visible
    }
}

fn compare(a: Option<&str>, b: Option<&str>) -> Ordering {
    a.unwrap_or("").cmp(b.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Col {
        Name,
        City,
    }

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        city: Option<&'static str>,
    }

    impl Listable for Row {
        type SortField = Col;

        fn search_fields(&self) -> Vec<Option<&str>> {
            vec![Some(self.name), self.city]
        }

        fn sort_value(&self, field: Col) -> Option<&str> {
            match field {
                Col::Name => Some(self.name),
                Col::City => self.city,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Beta", city: Some("Cairo") },
            Row { name: "alpha", city: None },
            Row { name: "Gamma", city: Some("Alexandria") },
        ]
    }

    fn names(rows: Vec<&Row>) -> Vec<&'static str> {
        rows.into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_empty_search_keeps_everything_sorted() {
        let rows = rows();
        let query = ListQuery::new(Col::Name);
        // Byte order: uppercase sorts before lowercase.
        assert_eq!(names(query.apply(&rows)), vec!["Beta", "Gamma", "alpha"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = rows();
        let query = ListQuery::new(Col::Name).with_search("CAI");
        assert_eq!(names(query.apply(&rows)), vec!["Beta"]);

        let query = ListQuery::new(Col::Name).with_search("   ");
        assert_eq!(query.apply(&rows).len(), 3);
    }

    #[test]
    fn test_missing_values_sort_as_empty() {
        let rows = rows();
        let query = ListQuery::new(Col::City);
        assert_eq!(names(query.apply(&rows)), vec!["alpha", "Gamma", "Beta"]);

        let query = query.with_direction(SortDirection::Desc);
        assert_eq!(names(query.apply(&rows)), vec!["Beta", "Gamma", "alpha"]);
    }

    #[test]
    fn test_toggle_sort() {
        let mut query = ListQuery::new(Col::Name);
        query.toggle_sort(Col::Name);
        assert_eq!(query.direction, SortDirection::Desc);

        query.toggle_sort(Col::Name);
        assert_eq!(query.direction, SortDirection::Asc);

        query.toggle_sort(Col::Name);
        query.toggle_sort(Col::City);
        assert_eq!(query.sort_by, Col::City);
        assert_eq!(query.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_is_stable() {
        let rows = vec![
            Row { name: "first", city: Some("x") },
            Row { name: "second", city: Some("x") },
        ];
        let query = ListQuery::new(Col::City).with_direction(SortDirection::Desc);
        assert_eq!(names(query.apply(&rows)), vec!["first", "second"]);
    }
}

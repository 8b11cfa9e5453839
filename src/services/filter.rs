use crate::models::Export;

/// Lowercase with underscores read as spaces
pub fn normalize(value: &str) -> String {
    value.to_lowercase().replace('_', " ")
}

pub fn matches_search(export: &Export, search: &str) -> bool {
    search.is_empty() || normalize(&export.name).contains(&normalize(search))
}

/// Exports whose normalized name contains the normalized search term.
///
/// An empty term or an unloaded collection passes the input through unchanged.
pub fn filter_exports<'a>(exports: Option<&'a [Export]>, search: &str) -> Option<Vec<&'a Export>> {
    let exports = exports?;
    Some(
        exports
            .iter()
            .filter(|e| matches_search(e, search))
            .collect(),
    )
}

/// Full collection in registry order with a visibility flag per item.
///
/// Hidden items stay in the iteration so lookups by id keep working while a
/// search is active.
#[derive(Debug)]
pub struct FilteredView<'a> {
    items: Vec<(&'a Export, bool)>,
    loaded: bool,
}

impl<'a> FilteredView<'a> {
    pub fn new(exports: Option<&'a [Export]>, search: &str) -> Self {
        let items = exports
            .unwrap_or_default()
            .iter()
            .map(|e| (e, matches_search(e, search)))
            .collect();
        Self {
            items,
            loaded: exports.is_some(),
        }
    }

    pub fn items(&self) -> &[(&'a Export, bool)] {
        &self.items
    }

    pub fn visible(&self) -> impl Iterator<Item = &'a Export> + '_ {
        self.items.iter().filter(|(_, v)| *v).map(|(e, _)| *e)
    }

    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|(_, v)| *v).count()
    }

    /// Drives the "No exports found" state
    pub fn is_empty(&self) -> bool {
        !self.loaded || self.visible_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::export;

    fn sample() -> Vec<Export> {
        vec![
            export("1", "Front_Door"),
            export("2", "backyard_night"),
            export("3", "Driveway"),
        ]
    }

    #[test]
    fn test_case_and_underscore_insensitive() {
        let exports = sample();
        let by_spaces = filter_exports(Some(exports.as_slice()), "front door").unwrap();
        assert_eq!(by_spaces.len(), 1);
        assert_eq!(by_spaces[0].id, "1");

        let upper = filter_exports(Some(exports.as_slice()), "FRONT").unwrap();
        assert_eq!(upper[0].id, "1");

        let underscored = filter_exports(Some(exports.as_slice()), "backyard_n").unwrap();
        assert_eq!(underscored[0].id, "2");
    }

    #[test]
    fn test_empty_search_returns_everything_in_order() {
        let exports = sample();
        let all = filter_exports(Some(exports.as_slice()), "").unwrap();
        let ids: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_unloaded_collection_passes_through() {
        assert!(filter_exports(None, "front").is_none());
    }

    #[test]
    fn test_same_inputs_same_membership() {
        let exports = sample();
        let first: Vec<&str> = filter_exports(Some(exports.as_slice()), "a")
            .unwrap()
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        let second: Vec<&str> = filter_exports(Some(exports.as_slice()), "a")
            .unwrap()
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_view_keeps_hidden_items() {
        let exports = sample();
        let view = FilteredView::new(Some(exports.as_slice()), "drive");
        assert_eq!(view.items().len(), 3);
        assert_eq!(view.visible_count(), 1);
        assert!(!view.items()[0].1);
        assert!(view.items()[2].1);
        assert!(!view.is_empty());
    }

    #[test]
    fn test_view_empty_states() {
        assert!(FilteredView::new(None, "").is_empty());

        let exports = sample();
        assert!(FilteredView::new(Some(exports.as_slice()), "garage").is_empty());
    }
}

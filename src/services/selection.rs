use crate::models::Export;

use super::registry::ExportRegistry;

/// Key under which the open export's id is shared
pub const SELECTION_KEY: &str = "id";

/// Below this aspect ratio the player is letterboxed to 16:9
const WIDE_ASPECT: f64 = 1.5;

/// State kept outside the controller (e.g. a URL query) that mirrors the selection
pub trait SharedState: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    /// Serialized form, suitable for a shareable link
    fn to_query_string(&self) -> String;
}

/// Ordered key/value pairs rendered as a URL query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    params: Vec<(String, String)>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `a=1&b=two` (a leading `?` is ignored); undecodable pairs are skipped
    pub fn parse(query: &str) -> Self {
        let params = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = urlencoding::decode(parts.next()?).ok()?.into_owned();
                let value = urlencoding::decode(parts.next().unwrap_or("")).ok()?.into_owned();
                Some((key, value))
            })
            .collect();
        Self { params }
    }
}

impl SharedState for QueryState {
    fn get(&self, key: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Export open in the viewer plus the loaded media's aspect ratio
#[derive(Debug, Default)]
pub struct SelectionState {
    selected: Option<Export>,
    aspect: f64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Export> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Applies the shared id to the selection.
    ///
    /// Returns `false` while the registry has not loaded yet, leaving the id
    /// pending. An id with no matching export clears the selection.
    pub fn sync_from_shared(&mut self, shared: &dyn SharedState, registry: &ExportRegistry) -> bool {
        let Some(id) = shared.get(SELECTION_KEY) else {
            return false;
        };
        if !registry.is_loaded() {
            tracing::debug!("Selection id={} deferred until exports load", id);
            return false;
        }

        self.selected = registry.find(&id).cloned();
        if self.selected.is_none() {
            tracing::debug!("Selection id={} not found in registry", id);
        }
        true
    }

    pub fn open(&mut self, export: Export, shared: &mut dyn SharedState) {
        shared.set(SELECTION_KEY, &export.id);
        self.selected = Some(export);
    }

    pub fn close(&mut self, shared: &mut dyn SharedState) {
        self.selected = None;
        shared.remove(SELECTION_KEY);
    }

    /// Records natural media dimensions; a zero height leaves the ratio untouched
    pub fn on_media_loaded(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = f64::from(width) / f64::from(height);
    }

    /// 0.0 until media has loaded
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect
    }

    pub fn is_wide(&self) -> bool {
        self.aspect >= WIDE_ASPECT
    }

    pub fn title(&self) -> Option<String> {
        self.selected.as_ref().map(Export::display_name)
    }
}

//! Content resolution: at most one of `children`, `content` and
//! `dangerouslySetInnerHTML` may be set on a node.

use crate::error::ConfigurationError;
use crate::props::{Child, PropValue, Props, CHILDREN, CONTENT, DANGEROUSLY_SET_INNER_HTML, HTML_KEY};

/// The content a property map declares for its node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContentSource {
    /// Child descriptors. A scalar `children` value becomes a single text child.
    Children(Vec<Child>),
    /// Text, escaped when rendered.
    PlainContent(String),
    /// Markup inserted verbatim.
    RawMarkup(String),
    #[default]
    None,
}

impl ContentSource {
    /// Resolve the content of `props`, failing if more than one source is set.
    ///
    /// A source is set when its key exists with a non-`Null` value; empty
    /// strings and empty child lists count.
    pub fn resolve(props: &Props) -> Result<Self, ConfigurationError> {
        let declared = [CHILDREN, CONTENT, DANGEROUSLY_SET_INNER_HTML]
            .into_iter()
            .filter(|key| props.get_present(key).is_some())
            .count();
        if declared > 1 {
            return Err(ConfigurationError::MultipleContentSources);
        }
        Ok(Self::resolve_lenient(props))
    }

    /// Resolve without the exclusivity check. When several sources are set,
    /// raw markup wins over plain content, which wins over children.
    pub fn resolve_lenient(props: &Props) -> Self {
        if let Some(value) = props.get_present(DANGEROUSLY_SET_INNER_HTML) {
            return ContentSource::RawMarkup(raw_markup(value));
        }
        if let Some(value) = props.get_present(CONTENT) {
            return ContentSource::PlainContent(value.to_text().unwrap_or_default());
        }
        if let Some(value) = props.get_present(CHILDREN) {
            let children = match value {
                PropValue::Children(children) => children.clone(),
                other => other.to_text().map(Child::Text).into_iter().collect(),
            };
            return ContentSource::Children(children);
        }
        ContentSource::None
    }
}

/// Extract raw markup from `{ __html: ... }`; a bare string is used as is.
fn raw_markup(value: &PropValue) -> String {
    match value {
        PropValue::Map(wrapper) => wrapper
            .get(HTML_KEY)
            .and_then(PropValue::to_text)
            .unwrap_or_default(),
        other => other.to_text().unwrap_or_default(),
    }
}

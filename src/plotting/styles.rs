use serde_json::Value;
use crate::plotting::PlotError;
/// Fallback for channels a signal style list does not cover.
pub const SIGNAL_STYLE_FALLBACK: &str = "";
/// Fallback for channels an annotation style list does not cover.
pub const ANNOTATION_STYLE_FALLBACK: &str = "r*";
/// One style token for every channel, or one per channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleSpec {
    Uniform(String),
    PerChannel(Vec<String>),
}
impl StyleSpec {
    /// Lists may be shorter than the channel count, never longer.
    pub fn check(&self, field: &str, n_channels: usize) -> Result<(), PlotError> {
        match self {
            StyleSpec::Uniform(_) => Ok(()),
            StyleSpec::PerChannel(list) if list.len() > n_channels => {
                Err(PlotError::length_mismatch(field, n_channels, list.len()))
            }
            StyleSpec::PerChannel(_) => Ok(()),
        }
    }
    pub fn from_json(field: &str, value: &Value) -> Result<Self, PlotError> {
        match value {
            Value::String(s) => Ok(StyleSpec::Uniform(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_owned)
                        .ok_or_else(|| PlotError::wrong_type(field, "a string or a list of strings"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(StyleSpec::PerChannel),
            _ => Err(PlotError::wrong_type(field, "a string or a list of strings")),
        }
    }
}
impl From<&str> for StyleSpec {
    fn from(value: &str) -> Self {
        StyleSpec::Uniform(value.to_owned())
    }
}
impl From<String> for StyleSpec {
    fn from(value: String) -> Self {
        StyleSpec::Uniform(value)
    }
}
impl From<Vec<String>> for StyleSpec {
    fn from(value: Vec<String>) -> Self {
        StyleSpec::PerChannel(value)
    }
}
impl From<Vec<&str>> for StyleSpec {
    fn from(value: Vec<&str>) -> Self {
        StyleSpec::PerChannel(value.into_iter().map(str::to_owned).collect())
    }
}
/// Resolves a spec into exactly `n_channels` tokens, padding with `fallback`.
///
/// Lists longer than `n_channels` are rejected by [`StyleSpec::check`] before
/// this runs; they are passed through untruncated here.
pub fn expand_styles(spec: &StyleSpec, n_channels: usize, fallback: &str) -> Vec<String> {
    match spec {
        StyleSpec::Uniform(token) => vec![token.clone(); n_channels],
        StyleSpec::PerChannel(list) => {
            let mut out = list.clone();
            if out.len() < n_channels {
                out.resize(n_channels, fallback.to_owned());
            }
            out
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    #[test]
    fn uniform_token_is_replicated() {
        let styles = expand_styles(&"r*".into(), 3, SIGNAL_STYLE_FALLBACK);
        assert_eq!(styles, vec!["r*", "r*", "r*"]);
    }
    #[test]
    fn short_lists_are_padded_with_fallback() {
        for n in 1..6 {
            for k in 0..=n {
                let given: Vec<String> = (0..k).map(|i| format!("C{i}")).collect();
                let out = expand_styles(&given.clone().into(), n, ANNOTATION_STYLE_FALLBACK);
                assert_eq!(out.len(), n);
                assert_eq!(&out[..k], &given[..]);
                assert!(out[k..].iter().all(|s| s == ANNOTATION_STYLE_FALLBACK));
            }
        }
    }
    #[test]
    fn long_lists_fail_the_check() {
        let spec: StyleSpec = vec!["r", "g", "b"].into();
        let err = spec.check("sig_style", 2).unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { expected: 2, actual: 3, .. }));
        assert!(spec.check("sig_style", 3).is_ok());
    }
    #[test]
    fn json_styles_must_be_strings() {
        assert_eq!(
            StyleSpec::from_json("ann_style", &json!(["b", "k"])).unwrap(),
            StyleSpec::PerChannel(vec!["b".into(), "k".into()])
        );
        assert!(matches!(
            StyleSpec::from_json("ann_style", &json!(3)),
            Err(PlotError::Type { .. })
        ));
        assert!(matches!(
            StyleSpec::from_json("ann_style", &json!(["b", 1])),
            Err(PlotError::Type { .. })
        ));
    }
}

use crate::protocol::{ParameterSet, DEFAULT_GRADE, DEFAULT_WEIGHT};

pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/google/material-design-icons/master/symbols/web";

/// `{icon}[_wght{w}][_grad{g}|_gradN{|g|}][fill1]_{size}px.svg`
///
/// Default weight and grade are omitted; the remote repository has no file otherwise.
pub fn icon_filename(icon_name: &str, params: &ParameterSet) -> String {
    let mut filename = String::from(icon_name);
    if params.weight != DEFAULT_WEIGHT {
        filename.push_str(&format!("_wght{}", params.weight));
    }
    if params.grade != DEFAULT_GRADE {
        if params.grade < 0 {
            filename.push_str(&format!("_gradN{}", params.grade.unsigned_abs()));
        } else {
            filename.push_str(&format!("_grad{}", params.grade));
        }
    }
    if params.fill {
        filename.push_str("fill1");
    }
    filename.push_str(&format!("_{}px.svg", params.size));
    filename
}

pub fn build_icon_url(base_url: &str, icon_name: &str, params: &ParameterSet) -> String {
    format!(
        "{}/{}/{}/{}",
        base_url.trim_end_matches('/'),
        icon_name,
        params.style.token(),
        icon_filename(icon_name, params)
    )
}

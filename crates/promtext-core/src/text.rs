//! Exposition-text formatting helpers (numbers, label blocks, escaping).

use std::fmt::Write as _;

use crate::labels::LabelSet;

/// Append a value in exposition form: `NaN`, `+Inf`, `-Inf`, or the
/// shortest decimal representation that round-trips.
pub(crate) fn push_f64(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "+Inf" } else { "-Inf" });
    } else {
        let _ = write!(out, "{value}");
    }
}

/// Escape a label value for the text format.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn push_label(out: &mut String, name: &str, value: &str, first: &mut bool) {
    if !*first {
        out.push(',');
    }
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_label(value));
    out.push('"');
    *first = false;
}

/// Append the `{...}` label block: global labels first, then local labels,
/// then the optional `le` pseudo-label. Appends nothing at all when there is
/// nothing to print, so unlabeled series carry no empty `{}`.
pub(crate) fn push_label_block(
    out: &mut String,
    global: &LabelSet,
    local: &LabelSet,
    le: Option<f64>,
) {
    if global.is_empty() && local.is_empty() && le.is_none() {
        return;
    }

    let mut first = true;
    out.push('{');
    for (name, value) in global.iter() {
        push_label(out, name, value, &mut first);
    }
    for (name, value) in local.iter() {
        push_label(out, name, value, &mut first);
    }
    if let Some(le) = le {
        let mut v = String::new();
        push_f64(&mut v, le);
        push_label(out, "le", &v, &mut first);
    }
    out.push('}');
}

//! HTML fragment builders for the settings pages
//!
//! Every builder returns an owned fragment string. Interpolated text and
//! attribute values are escaped.

/// Escape text for use in element content or a double-quoted attribute
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn page_header(title: &str) -> String {
    format!(
        "<div class=\"row\"><div class=\"col-lg-12\"><h1 class=\"page-header\">{}</h1></div></div>",
        escape_html(title)
    )
}

/// Panel shell with a heading. `body` is inserted as-is inside the panel body.
pub fn settings_panel(title: &str, id: &str, body: &str) -> String {
    format!(
        "<div class=\"row\"><div class=\"col-lg-12\"><div class=\"panel panel-default\">\
         <div class=\"panel-heading\">{}</div>\
         <div class=\"panel-body\" id=\"{}\">{}</div>\
         </div></div></div>",
        escape_html(title),
        escape_html(id),
        body
    )
}

/// Wrap fields in a form element
pub fn form(id: &str, fields: &str) -> String {
    format!("<form role=\"form\" id=\"{}\">{}</form>", escape_html(id), fields)
}

pub fn form_entry(label: &str, id: &str, value: &str, placeholder: &str) -> String {
    form_entry_with_attrs(label, id, value, placeholder, &[])
}

/// Text entry bound to a date picker with the time component disabled
pub fn form_date_entry(label: &str, id: &str, value: &str) -> String {
    form_entry_with_attrs(
        label,
        id,
        value,
        "",
        &[
            ("data-datepicker", "true"),
            ("data-timepicker", "false"),
            ("data-format", "d/m/Y"),
        ],
    )
}

fn form_entry_with_attrs(
    label: &str,
    id: &str,
    value: &str,
    placeholder: &str,
    attrs: &[(&str, &str)],
) -> String {
    let id = escape_html(id);
    let extra: String = attrs
        .iter()
        .map(|(name, val)| format!(" {}=\"{}\"", name, escape_html(val)))
        .collect();
    format!(
        "<div class=\"form-group\"><label for=\"{id}\">{}</label>\
         <input class=\"form-control\" id=\"{id}\" name=\"{id}\" value=\"{}\" placeholder=\"{}\"{extra}></div>",
        escape_html(label),
        escape_html(value),
        escape_html(placeholder),
    )
}

pub fn form_checkbox(id: &str, label: &str, checked: bool) -> String {
    let id = escape_html(id);
    format!(
        "<div class=\"checkbox\"><label><input type=\"checkbox\" id=\"{id}\" name=\"{id}\"{}>{}</label></div>",
        if checked { " checked" } else { "" },
        escape_html(label)
    )
}

pub fn form_select<S: AsRef<str>>(label: &str, id: &str, options: &[S], selected: &str) -> String {
    let id = escape_html(id);
    let mut opts = String::new();
    for option in options {
        let option = option.as_ref();
        let escaped = escape_html(option);
        if option == selected {
            opts.push_str(&format!("<option value=\"{escaped}\" selected>{escaped}</option>"));
        } else {
            opts.push_str(&format!("<option value=\"{escaped}\">{escaped}</option>"));
        }
    }
    format!(
        "<div class=\"form-group\"><label for=\"{id}\">{}</label>\
         <select class=\"form-control\" id=\"{id}\" name=\"{id}\">{opts}</select></div>",
        escape_html(label)
    )
}

pub fn form_button(label: &str, id: &str) -> String {
    format!(
        "<button type=\"submit\" id=\"{}\" class=\"btn btn-default\">{}</button>",
        escape_html(id),
        escape_html(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_select_marks_only_the_selected_option() {
        let html = form_select("Currency", "sel", &["USD", "EUR"], "EUR");
        assert!(html.contains("<option value=\"EUR\" selected>EUR</option>"));
        assert!(html.contains("<option value=\"USD\">USD</option>"));
    }

    #[test]
    fn test_checkbox_state() {
        assert!(form_checkbox("c", "Label", true).contains(" checked"));
        assert!(!form_checkbox("c", "Label", false).contains("checked"));
    }

    #[test]
    fn test_entry_escapes_value() {
        let html = form_entry("Port", "port", "\"><script>", "");
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_date_entry_disables_timepicker() {
        let html = form_date_entry("Start", "start", "01/08/2015");
        assert!(html.contains("data-datepicker=\"true\""));
        assert!(html.contains("data-timepicker=\"false\""));
    }
}

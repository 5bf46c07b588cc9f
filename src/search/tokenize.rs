/// Split `text` into lower-case search terms.
///
/// Words break on any non-alphanumeric character and on case transitions:
/// `gtk_widget_show` and `GtkWidgetShow` both yield `gtk`, `widget`, `show`;
/// acronym runs split before their last capital (`HTTPServer` yields `http`,
/// `server`).
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let chars: Vec<char> = word.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let (prev, cur) = (chars[i - 1], chars[i]);
            let camel = (prev.is_lowercase() || prev.is_numeric()) && cur.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && cur.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if camel || acronym_end {
                tokens.push(lower(&chars[start..i]));
                start = i;
            }
        }
        tokens.push(lower(&chars[start..]));
    }

    tokens
}

fn lower(chars: &[char]) -> String {
    chars.iter().flat_map(|c| c.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_and_camel_case() {
        assert_eq!(tokenize("gtk_widget_show"), vec!["gtk", "widget", "show"]);
        assert_eq!(tokenize("GtkWidget"), vec!["gtk", "widget"]);
        assert_eq!(tokenize("showAll"), vec!["show", "all"]);
    }

    #[test]
    fn test_acronym_runs() {
        assert_eq!(tokenize("HTTPServer"), vec!["http", "server"]);
        assert_eq!(tokenize("GDK_BUTTON_PRIMARY"), vec!["gdk", "button", "primary"]);
        assert_eq!(tokenize("GIOErrorEnum"), vec!["gio", "error", "enum"]);
    }

    #[test]
    fn test_member_separators() {
        assert_eq!(
            tokenize("GtkWidget::query-tooltip"),
            vec!["gtk", "widget", "query", "tooltip"]
        );
        assert_eq!(tokenize("GtkButton:label"), vec!["gtk", "button", "label"]);
    }

    #[test]
    fn test_digits_and_empty_input() {
        assert_eq!(tokenize("gtk4Widget"), vec!["gtk4", "widget"]);
        assert!(tokenize("  ::  ").is_empty());
    }
}

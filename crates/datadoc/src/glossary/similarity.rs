//! String normalization and similarity for glossary lookups.

/// Lower-case a name and collapse runs of `_`, `-` and whitespace into a
/// single `_`, dropping leading and trailing separators.
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase()
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_whitespace()
}

/// Turn a technical column name into a display label: split on separators
/// and camelCase boundaries, then title-case each token.
///
/// `customer_id` becomes `Customer Id`, `CustName` becomes `Cust Name`.
pub fn humanize(name: &str) -> String {
    let mut tokens: Vec<String> = Vec::new();

    for part in name.split(is_separator).filter(|p| !p.is_empty()) {
        let chars: Vec<char> = part.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            let boundary = i > 0
                && c.is_uppercase()
                && (chars[i - 1].is_lowercase()
                    || (chars[i - 1].is_uppercase()
                        && chars.get(i + 1).is_some_and(|n| n.is_lowercase())));
            if boundary && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
        if !current.is_empty() {
            tokens.push(current);
        }
    }

    tokens
        .iter()
        .map(|t| title_case(t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Similarity in [0, 1]: one minus the edit distance over the longer length.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Customer Name"), "customer_name");
        assert_eq!(normalize_key("customer--name"), "customer_name");
        assert_eq!(normalize_key("_Order__ID_"), "order_id");
        assert_eq!(normalize_key("CustName"), "custname");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("CustName"), "Cust Name");
        assert_eq!(humanize("customer_id"), "Customer Id");
        assert_eq!(humanize("order-total amount"), "Order Total Amount");
        assert_eq!(humanize("HTTPStatus"), "Http Status");
        assert_eq!(humanize("EMAIL"), "Email");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abcd", "abce"), 0.75);
        assert!(similarity("custname", "customer_name") < 0.8);
    }
}

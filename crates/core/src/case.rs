/// Converts a camelCase identifier to kebab-case.
///
/// A leading uppercase letter becomes a leading dash, which turns React's
/// vendor-prefixed style keys into their CSS names.
///
/// # Examples
///
/// ```
/// use elements_core::case::camel_to_kebab;
///
/// assert_eq!(camel_to_kebab("stopColor"), "stop-color");
/// assert_eq!(camel_to_kebab("strokeMiterlimit"), "stroke-miterlimit");
/// assert_eq!(camel_to_kebab("WebkitMask"), "-webkit-mask");
/// assert_eq!(camel_to_kebab("opacity"), "opacity");
/// ```
pub fn camel_to_kebab(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for ch in input.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Title-cases a hyphenated slug: "ai-elements" becomes "Ai Elements".
pub fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ai-elements"), "Ai Elements");
        assert_eq!(title_case("foobar"), "Foobar");
        assert_eq!(title_case("a--b"), "A B");
        assert_eq!(title_case(""), "");
    }
}

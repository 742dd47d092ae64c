/// Normalize a station label into the join key shared by both datasets
///
/// Lowercases, strips accents, removes parentheses, turns hyphens into
/// spaces and collapses whitespace runs. Total and idempotent.
///
/// # Examples
/// ```
/// use idf_rail_dashboard::utils::normalize_station_name;
///
/// assert_eq!(normalize_station_name("Gare de Lyon (RER)"), "gare de lyon rer");
/// assert_eq!(normalize_station_name("Marne-la-Vallée Chessy"), "marne la vallee chessy");
/// ```
pub fn normalize_station_name(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.chars() {
        for lower in c.to_lowercase() {
            fold_char(lower, &mut folded);
        }
    }

    let spaced: String = folded
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();

    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Variant for cells that may be absent; a missing value keys to ""
pub fn normalize_station_name_opt(raw: Option<&str>) -> String {
    match raw {
        Some(s) => normalize_station_name(s),
        None => String::new(),
    }
}

/// Fold one lowercased character to its unaccented ASCII form
///
/// Covers the Latin-1 Supplement and Latin Extended-A characters that occur
/// in Île-de-France station names; anything else passes through unchanged.
fn fold_char(c: char, out: &mut String) {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => out.push('a'),
        'ç' | 'ć' | 'č' => out.push('c'),
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ě' => out.push('e'),
        'ì' | 'í' | 'î' | 'ï' | 'ī' => out.push('i'),
        'ñ' | 'ń' => out.push('n'),
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ō' => out.push('o'),
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => out.push('u'),
        'ý' | 'ÿ' => out.push('y'),
        'œ' => out.push_str("oe"),
        'æ' => out.push_str("ae"),
        'ß' => out.push_str("ss"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_reference_label() {
        assert_eq!(normalize_station_name("Gare de Lyon (RER)"), "gare de lyon rer");
    }

    #[test]
    fn test_normalize_accents() {
        assert_eq!(normalize_station_name("Châtelet"), "chatelet");
        assert_eq!(normalize_station_name("La Défense (Grande Arche)"), "la defense grande arche");
        assert_eq!(normalize_station_name("Créteil--L'Échat"), "creteil l'echat");
    }

    #[test]
    fn test_normalize_hyphens_and_whitespace() {
        assert_eq!(
            normalize_station_name("  Marne-la-Vallée   Chessy "),
            "marne la vallee chessy"
        );
        assert_eq!(normalize_station_name("Saint-Rémy-lès-Chevreuse"), "saint remy les chevreuse");
    }

    #[test]
    fn test_normalize_ligatures() {
        assert_eq!(normalize_station_name("Sablons (Jardin d'acclimatation) Œ"), "sablons jardin d'acclimatation oe");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "Gare de Lyon (RER)",
            "Châtelet",
            "Marne-la-Vallée Chessy",
            "123",
            "",
            "   ",
        ];
        for raw in inputs {
            let once = normalize_station_name(raw);
            assert_eq!(normalize_station_name(&once), once);
        }
    }

    #[test]
    fn test_normalize_non_text_input() {
        // Numeric-looking labels normalize without panicking
        assert_eq!(normalize_station_name("123"), "123");
        assert_eq!(normalize_station_name_opt(None), "");
        assert_eq!(normalize_station_name_opt(Some("Étoile")), "etoile");
    }
}

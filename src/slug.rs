use std::future::Future;

const FALLBACK: &str = "item";
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Lowercase ASCII slug. Portuguese diacritics are folded, any other run of
/// non-alphanumeric characters becomes a single `-`. Combining marks from
/// decomposed input are dropped so `a\u{303}` folds like `ã`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if COMBINING_MARKS.contains(&c) {
            continue;
        }
        let c = fold(c);
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        FALLBACK.to_string()
    } else {
        slug
    }
}

fn fold(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// First free slug among `base`, `base-1`, `base-2`, ...
pub async fn unique_slug<F, Fut, E>(base: &str, mut taken: F) -> Result<String, E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    if !taken(base.to_string()).await? {
        return Ok(base.to_string());
    }

    let mut counter: u32 = 1;
    loop {
        let candidate = format!("{base}-{counter}");
        if !taken(candidate.clone()).await? {
            return Ok(candidate);
        }
        counter += 1;
    }
}

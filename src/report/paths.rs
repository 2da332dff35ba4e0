/// Apply `(old, new)` substitutions left to right without overlap.
///
/// At each position the first listed pair that matches wins.
pub fn replace_all(s: &str, pairs: &[(String, String)]) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    'scan: while let Some(ch) = rest.chars().next() {
        for (old, new) in pairs {
            if !old.is_empty() && rest.starts_with(old.as_str()) {
                out.push_str(new);
                rest = &rest[old.len()..];
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// Browsable location of a license file.
///
/// Only rewritten when a prune prefix is set: the prefix is trimmed, the
/// replacements applied, and GitHub / gopkg.in paths turned into blob URLs.
pub fn display_path(raw: &str, prune: Option<&str>, replacements: &[(String, String)]) -> String {
    let Some(prune) = prune.filter(|p| !p.is_empty()) else {
        return raw.to_string();
    };
    let path = replace_all(raw.strip_prefix(prune).unwrap_or(raw), replacements);
    let parts: Vec<&str> = path.split('/').collect();
    if parts.len() < 3 {
        return path;
    }
    match parts[0] {
        "github.com" => {
            let mut out = parts[..3].to_vec();
            out.push("blob/master");
            out.extend_from_slice(&parts[3..]);
            out.join("/")
        }
        "gopkg.in" => gopkg_path(&parts).unwrap_or_else(|| "UNKNOWN-version parse error".to_string()),
        _ => parts.join("/"),
    }
}

/// `gopkg.in/pkg.v3/...` → `github.com/go-pkg/pkg/blob/v3/...`
/// `gopkg.in/user/pkg.v3/...` → `github.com/user/pkg/blob/v3/...`
fn gopkg_path(parts: &[&str]) -> Option<String> {
    let has_user = !parts[1].contains('.');
    let (owner, pkg_spec, rest) = if has_user {
        (parts[1].to_string(), parts[2], &parts[3..])
    } else {
        let name = parts[1].split('.').next()?;
        (format!("go-{name}"), parts[1], &parts[2..])
    };
    let (name, version) = match pkg_spec.split('.').collect::<Vec<_>>()[..] {
        [name, version] => (name, version),
        _ => return None,
    };

    let mut out = vec!["github.com", owner.as_str(), name, "blob", version];
    out.extend_from_slice(rest);
    Some(out.join("/"))
}

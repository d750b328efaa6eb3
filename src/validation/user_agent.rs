/// Replace every character outside `[A-Za-z0-9-_.()]` with `-`.
pub fn sanitize_community_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '(' | ')') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// `User-Agent` sent with every validation probe.
pub fn build_user_agent(product: &str, contact_url: &str, community_name: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let community = sanitize_community_name(community_name.trim());
    if community.is_empty() {
        format!("{product}/{version} (+{contact_url})")
    } else {
        format!("{product}/{version} (+{contact_url}) {community}")
    }
}

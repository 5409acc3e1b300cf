pub mod api_v1;
pub mod auth_handlers;
pub mod course_handlers;
pub mod dashboard;
pub mod student_handlers;
pub mod teacher_handlers;

use reqwest::Url;

/// Local path built from `segments`, each percent-encoded. Ids and names
/// come from the remote service and may contain `/`, `?` or spaces.
pub fn local_path(segments: &[&str]) -> String {
    Url::parse("http://localhost/")
        .ok()
        .and_then(|mut url| {
            url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
            Some(url.path().to_string())
        })
        .unwrap_or_else(|| format!("/{}", segments.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_escaped() {
        assert_eq!(local_path(&["teachers", "Li Ming"]), "/teachers/Li%20Ming");
        assert_eq!(local_path(&["teachers", "王老师"]), "/teachers/%E7%8E%8B%E8%80%81%E5%B8%88");
        assert_eq!(local_path(&["courses", "a/b?c"]), "/courses/a%2Fb%3Fc");
        assert_eq!(local_path(&["courses", "c1"]), "/courses/c1");
    }
}

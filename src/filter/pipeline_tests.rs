//! Unit tests for the filter and sort pipeline

#[cfg(test)]
mod tests {
    use crate::filter::{FilterOptions, MatchMode, SortBy, filter_resources, sort_resources};
    use crate::model::{Resource, ResourceType};
    use crate::testing::{file, ids, resource};

    fn sample() -> Vec<Resource> {
        let mut a = file("a", "Alpha report", "/work/alpha.PDF", &["t1"]);
        a.created_at = 10;
        a.updated_at = 300;

        let mut b = resource("b", ResourceType::Url, "https://rust-lang.org");
        b.title = "Rust homepage".to_string();
        b.tags = vec!["t1".to_string(), "t2".to_string()];
        b.created_at = 30;
        b.updated_at = 100;

        let mut c = file("c", "beta notes", "/work/Makefile", &["t2"]);
        c.created_at = 20;
        c.updated_at = 200;

        let mut d = resource("d", ResourceType::TextNote, "remember the milk");
        d.title = "Shopping".to_string();
        d.tags = vec!["t3".to_string(), "t1".to_string(), "t2".to_string()];
        d.created_at = 5;
        d.updated_at = 50;

        vec![a, b, c, d]
    }

    #[test]
    fn test_no_filters_returns_everything_sorted() {
        let resources = sample();
        let result = filter_resources(&resources, &FilterOptions::default());
        assert_eq!(ids(&result), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let resources = sample();
        let before = resources.clone();
        let _ = filter_resources(&resources, &FilterOptions::builder().sort_by(SortBy::Title).build());
        assert_eq!(resources, before);
    }

    #[test]
    fn test_empty_input() {
        let options = FilterOptions::builder().query("x").tag("t1").build();
        assert!(filter_resources(&[], &options).is_empty());
    }

    #[test]
    fn test_type_filter_selects_exact_subset() {
        let resources = sample();
        let options = FilterOptions::builder().resource_type(ResourceType::Url).build();
        let result = filter_resources(&resources, &options);
        assert_eq!(ids(&result), vec!["b"]);
        assert!(result.iter().all(|r| r.resource_type == ResourceType::Url));
    }

    #[test]
    fn test_substring_case_insensitive_by_default() {
        let resources = sample();
        let options = FilterOptions::builder().query("RUST").build();
        assert_eq!(ids(&filter_resources(&resources, &options)), vec!["b"]);
    }

    #[test]
    fn test_substring_case_sensitive() {
        let resources = sample();
        let options = FilterOptions::builder().query("rust").case_sensitive(true).build();
        // Title "Rust homepage" misses, but the URL contains "rust"
        assert_eq!(ids(&filter_resources(&resources, &options)), vec!["b"]);

        let options = FilterOptions::builder()
            .query("rust")
            .case_sensitive(true)
            .include_path(false)
            .build();
        assert!(filter_resources(&resources, &options).is_empty());
    }

    #[test]
    fn test_path_matching_toggle() {
        let resources = sample();
        let with_path = FilterOptions::builder().query("milk").build();
        assert_eq!(ids(&filter_resources(&resources, &with_path)), vec!["d"]);

        let without_path = FilterOptions::builder().query("milk").include_path(false).build();
        assert!(filter_resources(&resources, &without_path).is_empty());
    }

    #[test]
    fn test_regex_query() {
        let resources = sample();
        let options = FilterOptions::builder()
            .query(r"^(alpha|beta)\b")
            .regex(true)
            .include_path(false)
            .build();
        assert_eq!(ids(&filter_resources(&resources, &options)), vec!["a", "c"]);
    }

    #[test]
    fn test_regex_matches_path_when_enabled() {
        let resources = sample();
        let options = FilterOptions::builder().query(r"rust-lang\.org$").regex(true).build();
        assert_eq!(ids(&filter_resources(&resources, &options)), vec!["b"]);

        let options = FilterOptions::builder()
            .query(r"rust-lang\.org$")
            .regex(true)
            .include_path(false)
            .build();
        assert!(filter_resources(&resources, &options).is_empty());
    }

    #[test]
    fn test_regex_respects_case_sensitivity() {
        let resources = sample();
        let options = FilterOptions::builder()
            .query("^alpha")
            .regex(true)
            .case_sensitive(true)
            .include_path(false)
            .build();
        assert!(filter_resources(&resources, &options).is_empty());
    }

    #[test]
    fn test_invalid_regex_falls_back_to_substring() {
        let mut resources = sample();
        resources[2].title = "beta [draft".to_string();

        let options = FilterOptions::builder().query("[draft").regex(true).build();
        let result = filter_resources(&resources, &options);
        assert_eq!(ids(&result), vec!["c"]);
    }

    #[test]
    fn test_extension_filter_only_constrains_local_files() {
        let resources = sample();
        let options = FilterOptions::builder().extension("pdf").build();
        // "a" is the only .pdf file; "c" has no extension and is dropped;
        // the URL and the note pass regardless
        assert_eq!(ids(&filter_resources(&resources, &options)), vec!["a", "b", "d"]);
    }

    #[test]
    fn test_extension_filter_no_extension_sentinel() {
        let resources = sample();
        let options = FilterOptions::builder()
            .extension("(none)")
            .resource_type(ResourceType::LocalFile)
            .build();
        assert_eq!(ids(&filter_resources(&resources, &options)), vec!["c"]);
    }

    #[test]
    fn test_tag_and_vs_or() {
        let only_a = vec![file("x", "only A", "/x.txt", &["A"])];

        let and = FilterOptions::builder()
            .tags(vec!["A".to_string(), "B".to_string()])
            .match_mode(MatchMode::And)
            .build();
        assert!(filter_resources(&only_a, &and).is_empty());

        let or = FilterOptions::builder()
            .tags(vec!["A".to_string(), "B".to_string()])
            .match_mode(MatchMode::Or)
            .build();
        assert_eq!(ids(&filter_resources(&only_a, &or)), vec!["x"]);
    }

    #[test]
    fn test_predicates_combine() {
        let resources = sample();
        let options = FilterOptions::builder()
            .query("work")
            .resource_type(ResourceType::LocalFile)
            .tag("t2")
            .build();
        assert_eq!(ids(&filter_resources(&resources, &options)), vec!["c"]);
    }

    #[test]
    fn test_sort_orders() {
        let resources = sample();
        assert_eq!(ids(&sort_resources(resources.clone(), SortBy::Title)), vec!["a", "c", "b", "d"]);
        assert_eq!(ids(&sort_resources(resources.clone(), SortBy::CreatedAt)), vec!["b", "c", "a", "d"]);
        assert_eq!(ids(&sort_resources(resources.clone(), SortBy::TagCount)), vec!["d", "b", "a", "c"]);
        assert_eq!(ids(&sort_resources(resources, SortBy::UpdatedAt)), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let resources = vec![
            file("1", "same", "/1", &["t"]),
            file("2", "same", "/2", &["t"]),
            file("3", "same", "/3", &["t"]),
        ];
        for sort in [SortBy::Title, SortBy::CreatedAt, SortBy::TagCount, SortBy::UpdatedAt] {
            assert_eq!(ids(&sort_resources(resources.clone(), sort)), vec!["1", "2", "3"]);
        }
    }

    #[test]
    fn test_deterministic() {
        let resources = sample();
        let options = FilterOptions::builder().query("a").sort_by(SortBy::TagCount).build();
        assert_eq!(
            filter_resources(&resources, &options),
            filter_resources(&resources, &options)
        );
    }
}

use super::*;

#[test]
fn test_split_repositories_groups_and_solo() {
    let groups = split_repositories(&["a/b/c", "a/b/d", "solo"]);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups["a/b"], vec!["c", "d"]);
    assert_eq!(groups[""], vec!["solo"]);
}

#[test]
fn test_split_repositories_table() {
    let cases: Vec<(Vec<&str>, Vec<(&str, Vec<&str>)>)> = vec![
        (vec![], vec![]),
        (vec!["alpine"], vec![("", vec!["alpine"])]),
        (vec!["library/alpine"], vec![("library", vec!["alpine"])]),
        (
            vec!["team/app", "other/app", "team/web"],
            vec![("other", vec!["app"]), ("team", vec!["app", "web"])],
        ),
        (
            vec!["x/y/z/deep", "x/y/z/deeper", "x/y/shallow"],
            vec![("x/y", vec!["shallow"]), ("x/y/z", vec!["deep", "deeper"])],
        ),
        (vec!["zeta", "alpha"], vec![("", vec!["zeta", "alpha"])]),
    ];

    for (input, expected) in cases {
        let groups = split_repositories(&input);
        let actual: Vec<(&str, Vec<&str>)> = groups
            .iter()
            .map(|(g, names)| (g.as_str(), names.iter().map(String::as_str).collect()))
            .collect();
        assert_eq!(actual, expected, "input: {:?}", input);
    }
}

#[test]
fn test_split_repositories_keeps_duplicates() {
    let groups = split_repositories(&["team/app", "team/app"]);
    assert_eq!(groups["team"], vec!["app", "app"]);
}

#[test]
fn test_split_repositories_accepts_owned_strings() {
    let paths = vec!["team/app".to_string(), "solo".to_string()];
    let groups = split_repositories(&paths);
    assert_eq!(groups["team"], vec!["app"]);
}

#[test]
fn test_split_repository_single() {
    assert_eq!(split_repository("a/b/c"), ("a/b", "c"));
    assert_eq!(split_repository("solo"), ("", "solo"));
    assert_eq!(split_repository("trailing/"), ("trailing", ""));
}

#[test]
fn test_join_repository_round_trips_split() {
    for path in ["a/b/c", "solo", "team/app"] {
        let (group, name) = split_repository(path);
        assert_eq!(join_repository(group, name), path);
    }
}

use crate::cli::utils::*;

#[test]
fn test_truncate_with_ellipsis_short_string() {
    assert_eq!(truncate_with_ellipsis("milk", 10), "milk");
}

#[test]
fn test_truncate_with_ellipsis_exact_length() {
    assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
}

#[test]
fn test_truncate_with_ellipsis_long_string() {
    let result = truncate_with_ellipsis("Buy milk and eggs and bread", 10);
    assert_eq!(result, "Buy mil...");
}

#[test]
fn test_truncate_with_ellipsis_unicode() {
    assert_eq!(truncate_with_ellipsis("hello 世界", 8), "hello 世界");
    assert_eq!(truncate_with_ellipsis("hello 世界", 7), "hell...");
}

#[test]
fn test_truncate_with_tiny_max_does_not_panic() {
    assert_eq!(truncate_with_ellipsis("hello", 2), "...");
}

#[test]
fn test_or_dash() {
    assert_eq!(or_dash(None), "-");
    assert_eq!(or_dash(Some("   ")), "-");
    assert_eq!(or_dash(Some("2 liters")), "2 liters");
}

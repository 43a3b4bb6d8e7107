//! Tests for runtime configuration limits.

use crate::task::services::TaskRuntimeConfig;
use rstest::rstest;

#[rstest]
#[case(None, 25)]
#[case(Some(10), 10)]
#[case(Some(100), 100)]
#[case(Some(101), 100)]
#[case(Some(0), 1)]
fn page_size_is_clamped_to_configured_bounds(
    #[case] requested: Option<usize>,
    #[case] expected: usize,
) {
    assert_eq!(TaskRuntimeConfig::default().page_size(requested), expected);
}

#[rstest]
fn zero_max_page_size_still_allows_one_item() {
    let config = TaskRuntimeConfig::new().with_max_page_size(0);

    assert_eq!(config.page_size(Some(5)), 1);
}

#[rstest]
fn missing_fields_fall_back_to_defaults() -> eyre::Result<()> {
    let config: TaskRuntimeConfig = serde_json::from_str(r#"{"max_page_size": 40}"#)?;

    assert_eq!(
        config,
        TaskRuntimeConfig::new().with_max_page_size(40)
    );
    Ok(())
}

use std::sync::Arc;

use epidash_mock::MockSource;

/// Seed a small deterministic source shared by the examples.
pub fn get_source() -> Arc<MockSource> {
    Arc::new(
        MockSource::builder()
            .with_rows(
                "France",
                &[
                    ("2021-01-01", 2_600_000, 64_000),
                    ("2021-01-02", 2_620_000, 64_300),
                    ("2021-01-03", 2_635_000, 64_550),
                    ("2021-01-04", 2_655_000, 64_900),
                    ("2021-01-05", 2_680_000, 65_200),
                ],
            )
            .with_rows(
                "Italy",
                &[
                    ("2021-01-02", 2_150_000, 75_000),
                    ("2021-01-03", 2_165_000, 75_400),
                    ("2021-01-04", 2_180_000, 75_800),
                    ("2021-01-05", 2_195_000, 76_300),
                ],
            )
            .build(),
    )
}

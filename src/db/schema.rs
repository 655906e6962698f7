pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS usage_records (
    app_id TEXT NOT NULL,
    day TEXT NOT NULL,
    duration_ms INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (app_id, day)
);

CREATE INDEX IF NOT EXISTS idx_usage_records_day ON usage_records(day);
";

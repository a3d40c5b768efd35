pub static TEST_USER_AGENT: &str =
    "MyApp/1.0 (contact@example.com; +https://github.com/autumn-order/ore-ledger)";
/// Character invoices are mailed from in tests
pub static TEST_MAIL_SENDER_ID: i64 = 2114794365;
pub static TEST_ACCESS_TOKEN: &str = "test_access_token";

/// Render an amount of cents as a plain "123.45" display string.
pub fn format_money(cents: i64) -> String {
  let sign = if cents < 0 { "-" } else { "" };
  let cents = cents.abs();
  format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

/// Public tracking page for an Australia Post consignment.
///
/// Returns `None` for a blank tracking number.
#[must_use]
pub fn tracking_url(tracking_number: &str) -> Option<String> {
    let number = tracking_number.trim();
    if number.is_empty() {
        return None;
    }
    Some(format!(
        "https://auspost.com.au/mypost/track/#/details/{number}"
    ))
}

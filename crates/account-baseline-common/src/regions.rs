//! Region ordering for account sweeps

use crate::defaults::PREFERRED_REGION;

/// Order regions for processing: [`PREFERRED_REGION`] first, then the rest in
/// the order given, each exactly once.
pub fn ordered_regions<I, S>(available: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut output = vec![PREFERRED_REGION.to_string()];
    for region in available {
        let region = region.into();
        if !output.contains(&region) {
            output.push(region);
        }
    }
    output
}

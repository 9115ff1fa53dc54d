//! Jewel socket provisioning

use crate::item::GearItem;
use crate::types::GearCategory;

/// Total jewel sockets granted by the selected gear
///
/// Jewels themselves never contribute sockets. Unselected categories are
/// simply absent from the iterator.
pub fn compute_sockets<'a, I>(selection: I) -> u32
where
    I: IntoIterator<Item = (GearCategory, &'a GearItem)>,
{
    let total = selection
        .into_iter()
        .filter(|(category, _)| !category.is_jewel())
        .fold(0u32, |total, (_, item)| total.saturating_add(item.sockets));
    tracing::debug!(total, "computed total sockets");
    total
}

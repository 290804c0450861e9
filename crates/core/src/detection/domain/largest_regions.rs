use crate::shared::region::Region;

/// Keeps the `k` largest-area regions seen so far.
///
/// Slots start as [`Region::SENTINEL`]. An offered region replaces the
/// smallest slot only when its area is strictly greater; among equally
/// small slots the first one is replaced. Earlier regions therefore win
/// area ties against later ones.
#[derive(Clone, Debug)]
pub struct LargestRegions {
    slots: Vec<Region>,
}

impl LargestRegions {
    pub fn new(k: usize) -> Self {
        Self {
            slots: vec![Region::SENTINEL; k],
        }
    }

    pub fn offer(&mut self, region: Region) {
        let Some((idx, smallest)) = self
            .slots
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.area())
        else {
            return;
        };
        if region.area() > smallest.area() {
            self.slots[idx] = region;
        }
    }

    /// Selected regions in slot order. Unfilled slots remain sentinels.
    pub fn regions(&self) -> &[Region] {
        &self.slots
    }
}

/// Top-`k` selection over `regions`.
pub fn select(regions: impl IntoIterator<Item = Region>, k: usize) -> LargestRegions {
    let mut largest = LargestRegions::new(k);
    for r in regions {
        largest.offer(r);
    }
    largest
}

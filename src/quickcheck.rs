use alloc::{boxed::Box, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::RedwoodSet;

impl<K: Arbitrary + Ord> Arbitrary for RedwoodSet<K> {
    fn arbitrary(g: &mut Gen) -> Self {
        Vec::<K>::arbitrary(g).into_iter().collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let keys: Vec<K> = self.iter().cloned().collect();

        Box::new(keys.shrink().map(|keys| keys.into_iter().collect()))
    }
}

use serde::{Deserialize, Serialize};

use crate::models::{Event, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Regional,
    Online,
    Other,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Regional, Bucket::Online, Bucket::Other];

    /// Regional priority wins over online; everything else is "other".
    pub fn for_event(event: &Event) -> Self {
        if event.is_regional_priority {
            Bucket::Regional
        } else if event.is_online {
            Bucket::Online
        } else {
            Bucket::Other
        }
    }
}

/// Events split into the three buckets, each newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorized {
    pub regional: Vec<Event>,
    pub online: Vec<Event>,
    pub other: Vec<Event>,
}

impl Categorized {
    pub fn bucket(&self, bucket: Bucket) -> &[Event] {
        match bucket {
            Bucket::Regional => &self.regional,
            Bucket::Online => &self.online,
            Bucket::Other => &self.other,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Event> {
        match bucket {
            Bucket::Regional => &mut self.regional,
            Bucket::Online => &mut self.online,
            Bucket::Other => &mut self.other,
        }
    }

    pub fn len(&self) -> usize {
        self.regional.len() + self.online.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.regional
            .iter()
            .chain(self.online.iter())
            .chain(self.other.iter())
    }
}

/// Sorts newest first (stable, undated last) and splits into buckets.
///
/// Buckets are filters over the single global order, never re-sorted.
pub fn categorize(events: Vec<Event>) -> Categorized {
    let mut keyed = events
        .into_iter()
        .map(|event| (event.start_key(), event))
        .collect::<Vec<(SortKey, Event)>>();
    keyed.sort_by(|(a, _), (b, _)| SortKey::newest_first(a, b));

    let mut out = Categorized::default();
    for (_, event) in keyed {
        out.bucket_mut(Bucket::for_event(&event)).push(event);
    }
    out
}

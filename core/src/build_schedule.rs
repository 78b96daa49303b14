use log::debug;

use crate::config::BuildList;
use crate::world::TemplateId;

/// Position in the schedule where the next scan starts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleCursor {
    pub list: usize,
    pub item: usize,
}

impl ScheduleCursor {
    pub fn new(list: usize, item: usize) -> Self {
        Self { list, item }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Default)]
pub struct BuildSchedule {
    lists: Vec<BuildList>,
}

impl BuildSchedule {
    pub fn new(lists: Vec<BuildList>) -> Self {
        Self { lists }
    }

    /// Round-robin pick of the next eligible template.
    ///
    /// Scans forward from `cursor` to the end of the schedule without wrapping.
    /// Lists outside their time window are skipped. The list under the cursor
    /// is resumed at `cursor.item`, later lists from their first item. A hit
    /// moves the cursor one past the picked item, rolling over to the next list
    /// and back to the first. A miss anywhere sends the cursor back to `(0, 0)`.
    pub fn next_eligible<F>(
        &self,
        cursor: &mut ScheduleCursor,
        match_time: f32,
        is_eligible: F,
    ) -> Option<TemplateId>
    where
        F: Fn(TemplateId) -> bool,
    {
        for list_index in cursor.list..self.lists.len() {
            let list = &self.lists[list_index];
            if !list.window.is_active(match_time) {
                continue;
            }
            let start = if list_index == cursor.list {
                cursor.item
            } else {
                0
            };
            let found = list
                .units
                .iter()
                .enumerate()
                .skip(start)
                .find(|(_, template)| is_eligible(**template));
            if let Some((item_index, template)) = found {
                self.advance(cursor, list_index, item_index);
                return Some(*template);
            }
        }
        debug!("Schedule exhausted from {:?}, starting over", cursor);
        cursor.reset();
        None
    }

    fn advance(&self, cursor: &mut ScheduleCursor, list_index: usize, item_index: usize) {
        cursor.list = list_index;
        cursor.item = item_index + 1;
        if cursor.item == self.lists[list_index].units.len() {
            cursor.item = 0;
            cursor.list += 1;
            if cursor.list == self.lists.len() {
                cursor.list = 0;
            }
        }
    }
}

use solana_sdk::message::AddressLookupTableAccount;
use solana_sdk::pubkey::Pubkey;

/// An address lookup table as the ledger stores it.
///
/// Entries become usable by transactions only from the slot after the one in
/// which they were added, and a freshly created table cannot be referenced in
/// its creation slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTableState {
    pub authority: Pubkey,
    pub created_slot: u64,
    entries: Vec<(Pubkey, u64)>,
}

impl LookupTableState {
    pub fn new(authority: Pubkey, created_slot: u64) -> Self {
        Self {
            authority,
            created_slot,
            entries: Vec::new(),
        }
    }

    pub fn extend(&mut self, addresses: &[Pubkey], slot: u64) {
        self.entries
            .extend(addresses.iter().map(|address| (*address, slot)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The table as seen by a transaction executing at `slot`, or `None` if
    /// the table itself is not yet visible.
    pub fn visible_at(&self, key: Pubkey, slot: u64) -> Option<AddressLookupTableAccount> {
        if slot <= self.created_slot {
            return None;
        }

        let addresses = self
            .entries
            .iter()
            .take_while(|(_, added)| *added < slot)
            .map(|(address, _)| *address)
            .collect();

        Some(AddressLookupTableAccount { key, addresses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_invisible_in_creation_slot() {
        let table = LookupTableState::new(Pubkey::new_unique(), 10);

        assert!(table.visible_at(Pubkey::new_unique(), 10).is_none());
        assert!(table.visible_at(Pubkey::new_unique(), 11).is_some());
    }

    #[test]
    fn test_extension_visible_from_next_slot() {
        let key = Pubkey::new_unique();
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();

        let mut table = LookupTableState::new(Pubkey::new_unique(), 1);
        table.extend(&[first], 1);
        table.extend(&[second], 3);

        assert_eq!(table.visible_at(key, 2).unwrap().addresses, vec![first]);
        assert_eq!(table.visible_at(key, 3).unwrap().addresses, vec![first]);
        assert_eq!(
            table.visible_at(key, 4).unwrap().addresses,
            vec![first, second]
        );
        assert_eq!(table.len(), 2);
    }
}

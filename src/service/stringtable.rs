// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Localized string tables.

message! {
    /// Summary of one available string table.
    pub struct Info = entity("stringtable", "Info") {
        /// Culture code, e.g. `en-us`
        pub culture_code / "CultureCode": string,
        pub entry_count / "EntryCount": uint32,
    }
}

message! {
    /// A string table: identifier to localized text.
    pub struct StringTable = entity("stringtable", "StringTable") {
        pub info / "Info": (value Info),
        pub entries / "Entries": string_map,
    }
}

impl StringTable {
    /// Localized text for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

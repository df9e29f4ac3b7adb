//! WHOIS data structures.

use serde::Serialize;

use crate::error_handling::WhoisError;

/// Ownership information returned by one WHOIS server.
///
/// Each hop of a lookup produces one `Record`. The record of a later hop owns
/// the record of the hop before it through `parent`, so the value returned by
/// [`crate::Resolver::resolve`] carries the whole referral chain, most specific
/// server first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Address the lookup was made for
    pub address: String,
    /// `host:port` of the server that answered
    pub server: String,
    /// Next server to ask; empty when this server is authoritative
    pub referral_server: String,
    pub organization: String,
    pub country: String,
    pub net_name: String,
    /// Record of the previous hop
    pub parent: Option<Box<Record>>,
    /// Why the lookup stopped before reaching an authoritative server
    pub recurse_error: Option<WhoisError>,
}

impl Record {
    /// Best name for the owner of the address.
    ///
    /// Organization first, then network name, then whatever the previous hops
    /// know. Empty when no hop carried a name.
    pub fn display_name(&self) -> &str {
        if !self.organization.is_empty() {
            return &self.organization;
        }
        if !self.net_name.is_empty() {
            return &self.net_name;
        }
        match &self.parent {
            Some(parent) => parent.display_name(),
            None => "",
        }
    }

    /// True when the server gave no further referral.
    pub fn is_authoritative(&self) -> bool {
        self.referral_server.is_empty()
    }

    /// Iterates over this record and its ancestors, most specific first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Number of records in the chain, this one included.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }
}

/// Iterator returned by [`Record::chain`].
pub struct Chain<'a> {
    next: Option<&'a Record>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

/// Flattened view of one hop, used for JSON output.
#[derive(Debug, Serialize)]
pub struct HopSummary<'a> {
    pub server: &'a str,
    pub organization: &'a str,
    pub net_name: &'a str,
    pub country: &'a str,
    pub referral_server: &'a str,
}

impl<'a> From<&'a Record> for HopSummary<'a> {
    fn from(record: &'a Record) -> Self {
        HopSummary {
            server: &record.server,
            organization: &record.organization,
            net_name: &record.net_name,
            country: &record.country,
            referral_server: &record.referral_server,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hop(organization: &str, net_name: &str, parent: Option<Record>) -> Record {
        Record {
            organization: organization.to_string(),
            net_name: net_name.to_string(),
            parent: parent.map(Box::new),
            ..Default::default()
        }
    }

    #[test]
    fn test_display_name_prefers_organization() {
        let record = hop("google llc", "google", None);
        assert_eq!(record.display_name(), "google llc");
    }

    #[test]
    fn test_display_name_falls_back_to_net_name() {
        let record = hop("", "routerhosting", None);
        assert_eq!(record.display_name(), "routerhosting");
    }

    #[test]
    fn test_display_name_walks_parents() {
        let root = hop("ripe network coordination centre", "", None);
        let middle = hop("", "", Some(root));
        let leaf = hop("", "", Some(middle));
        assert_eq!(leaf.display_name(), "ripe network coordination centre");
    }

    #[test]
    fn test_display_name_empty_chain() {
        let leaf = hop("", "", Some(hop("", "", None)));
        assert_eq!(leaf.display_name(), "");
    }

    #[test]
    fn test_chain_and_depth() {
        let mut root = hop("arin", "", None);
        root.server = "whois.arin.net:43".to_string();
        let mut leaf = hop("hetzner online gmbh", "", Some(root));
        leaf.server = "whois.ripe.net:43".to_string();

        let servers: Vec<&str> = leaf.chain().map(|r| r.server.as_str()).collect();
        assert_eq!(servers, vec!["whois.ripe.net:43", "whois.arin.net:43"]);
        assert_eq!(leaf.depth(), 2);
        assert!(leaf.is_authoritative());
    }
}

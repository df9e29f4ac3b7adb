//! WHOIS response parsing.
//!
//! WHOIS bodies are free text with registry-specific `key: value` lines. The
//! parser looks for a handful of well-known keys and ignores everything else,
//! so malformed or unknown lines never cause an error.

use super::types::Record;

const ORGANIZATION_PREFIXES: &[&str] = &["orgname:", "org-name:", "contact:company:", "owner:"];
const NET_NAME_PREFIXES: &[&str] = &["netname:"];
const COUNTRY_PREFIXES: &[&str] = &["country:", "contact:country-code:"];
const REFERRAL_PREFIXES: &[&str] = &["registrar whois server:", "whois:", "referralserver:"];

/// Extracts ownership fields and the referral from a WHOIS response body.
///
/// Matching is case-insensitive and values are lower-cased. For every field
/// the first line with a non-empty value wins. `address` and `server` are left
/// for the caller to fill in.
pub fn parse(body: &str) -> Record {
    let mut record = Record::default();

    for line in body.lines() {
        let line = line.to_lowercase();

        set_if_empty(&mut record.organization, &line, ORGANIZATION_PREFIXES);
        set_if_empty(&mut record.net_name, &line, NET_NAME_PREFIXES);
        set_if_empty(&mut record.country, &line, COUNTRY_PREFIXES);

        if record.referral_server.is_empty() {
            if let Some(value) = find_with_prefixes(&line, REFERRAL_PREFIXES) {
                record.referral_server = remove_scheme(value).to_string();
            }
        }
    }

    record
}

fn set_if_empty(field: &mut String, line: &str, prefixes: &[&str]) {
    if !field.is_empty() {
        return;
    }
    if let Some(value) = find_with_prefixes(line, prefixes) {
        *field = value.to_string();
    }
}

/// Value of the first prefix in `prefixes` that `line` starts with.
fn find_with_prefixes<'a>(line: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// `whois://whois.ripe.net` -> `whois.ripe.net`
fn remove_scheme(addr: &str) -> &str {
    match addr.split_once("://") {
        Some((_, rest)) => rest,
        None => addr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(""), Record::default());
    }

    #[test]
    fn test_parse_whois_referral() {
        let body = "
% IANA WHOIS server
% for more information on IANA, visit http://www.iana.org

whois:        whois.arin.net

source:       IANA ";
        let expected = Record {
            referral_server: "whois.arin.net".to_string(),
            ..Default::default()
        };
        assert_eq!(parse(body), expected);
    }

    #[test]
    fn test_parse_bare_whois_line() {
        let record = parse("whois:   host");
        assert_eq!(record.referral_server, "host");
        assert!(record.organization.is_empty());
        assert!(record.country.is_empty());
        assert!(record.net_name.is_empty());
    }

    #[test]
    fn test_parse_referral_server_strips_scheme() {
        let body = "
#
# foo

ReferralServer:  whois://whois.ripe.net
";
        assert_eq!(parse(body).referral_server, "whois.ripe.net");
        assert_eq!(parse("ReferralServer:  whois://host").referral_server, "host");
    }

    #[test]
    fn test_parse_referral_and_orgname() {
        let body = "
# If you see inaccuracies in the results, please report at
OrgName:        RIPE Network Coordination Centre
ReferralServer:  whois://whois.ripe.net
";
        let record = parse(body);
        assert_eq!(record.referral_server, "whois.ripe.net");
        assert_eq!(record.organization, "ripe network coordination centre");
    }

    #[test]
    fn test_parse_org_name() {
        let body = "
organisation:   ORG-HOA1-RIPE
org-name:       Hetzner Online GmbH
";
        assert_eq!(parse(body).organization, "hetzner online gmbh");
    }

    #[test]
    fn test_parse_contact_company() {
        let body = "
contact:Class-Name:contact
contact:Name:Abuse Department
contact:Company:Joe's Datacenter, LLC
contact:Street-Address:1325 Tracy Ave.
contact:City:Kansas City
contact:Country-Code:US
";
        let record = parse(body);
        assert_eq!(record.organization, "joe's datacenter, llc");
        assert_eq!(record.country, "us");
    }

    #[test]
    fn test_parse_netname_and_country() {
        let body = "
inetnum:        45.138.172.0 - 45.138.172.255
netname:        ROUTERHOSTING
country:        NL
admin-c:        CONO
";
        let expected = Record {
            net_name: "routerhosting".to_string(),
            country: "nl".to_string(),
            ..Default::default()
        };
        assert_eq!(parse(body), expected);
    }

    #[test]
    fn test_parse_owner() {
        let body = "
inetnum:     167.56.0.0/13
status:      allocated
owner:       Administracion Nacional de Telecomunicaciones
ownerid:     UY-ANTA-LACNIC
responsible: ANTEL URUGUAY
";
        assert_eq!(
            parse(body).organization,
            "administracion nacional de telecomunicaciones"
        );
    }

    #[test]
    fn test_parse_first_match_wins() {
        let body = "
OrgName:   First Org
org-name:  Second Org
Country:   US
Country:   DE
";
        let record = parse(body);
        assert_eq!(record.organization, "first org");
        assert_eq!(record.country, "us");
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parse("OrgName:  Foo"), parse("orgname:  Foo"));
        assert_eq!(parse("ORGNAME:  Foo").organization, "foo");
    }

    #[test]
    fn test_parse_skips_empty_values() {
        let body = "
OrgName:
OrgName:   Later Org
";
        assert_eq!(parse(body).organization, "later org");
    }

    #[test]
    fn test_parse_crlf_lines() {
        let body = "NetName:  NET-1\r\nCountry:  BR\r\n";
        let record = parse(body);
        assert_eq!(record.net_name, "net-1");
        assert_eq!(record.country, "br");
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let body = "\u{0}\u{1}binary junk\n:::\norgname\nnetname :  spaced";
        assert_eq!(parse(body), Record::default());
    }

    #[test]
    fn test_remove_scheme() {
        assert_eq!(remove_scheme("whois://whois.ripe.net"), "whois.ripe.net");
        assert_eq!(remove_scheme("rwhois://host:4321"), "host:4321");
        assert_eq!(remove_scheme("whois.lacnic.net"), "whois.lacnic.net");
    }
}

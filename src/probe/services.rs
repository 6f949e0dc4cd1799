//! Well-known TCP port names

/// Label used for ports missing from [`WELL_KNOWN_SERVICES`]
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Static port → protocol table
pub const WELL_KNOWN_SERVICES: &[(u16, &str)] = &[
    (21, "FTP"),
    (22, "SSH"),
    (23, "Telnet"),
    (25, "SMTP"),
    (53, "DNS"),
    (80, "HTTP"),
    (110, "POP3"),
    (143, "IMAP"),
    (443, "HTTPS"),
    (3306, "MySQL"),
    (5432, "PostgreSQL"),
    (27017, "MongoDB"),
];

/// Conventional protocol name for a TCP port, or `"Unknown"`
pub fn resolve_service_name(port: u16) -> &'static str {
    WELL_KNOWN_SERVICES
        .iter()
        .find(|(p, _)| *p == port)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_SERVICE)
}

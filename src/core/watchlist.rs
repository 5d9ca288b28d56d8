// src/core/watchlist.rs

/// Domains checked by a bulk scan when the user does not supply their own.
///
/// Grouped by the kind of service that is commonly filtered: social networks,
/// streaming, messaging, gaming, adult content, VPN vendors, news and file
/// hosting.
pub const DEFAULT_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "tiktok.com",
    "youtube.com",
    "netflix.com",
    "spotify.com",
    "telegram.org",
    "whatsapp.com",
    "discord.com",
    "twitch.tv",
    "roblox.com",
    "pornhub.com",
    "xvideos.com",
    "nordvpn.com",
    "expressvpn.com",
    "bbc.com",
    "cnn.com",
    "wikipedia.org",
    "mega.nz",
    "mediafire.com",
];

/// Returns the default watch list as owned strings, ready to hand to a scan.
pub fn default_domains() -> Vec<String> {
    DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect()
}

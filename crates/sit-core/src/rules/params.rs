//! Built-in tracking parameter table.

/// Exact query parameter names dropped from every URL.
pub const TRACKING_PARAMS: &[&str] = &[
    // UTM
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    // Ad click ids
    "fbclid",
    "gclid",
    "msclkid",
    "igshid",
    // Mailchimp
    "mc_eid",
    "mc_cid",
    // Generic campaign names
    "source",
    "medium",
    "campaign",
    "content",
    "term",
    "ref",
    "referrer",
    "ref_src",
    "ref_url",
    "share",
    "share_source",
    // Analytics
    "_ga",
    "_gl",
    "_hsenc",
    "_hsmi",
    "yclid",
    "yp_c",
    // Affiliate networks
    "tag",
    "affiliate",
    "affiliateid",
    "aff",
    "afid",
    "pcrid",
    "productid",
    "keywordid",
    "siteid",
    "adid",
    "network",
    // Amazon
    "ascsubtag",
    "sc",
    "linkId",
    "linkCode",
    "camp",
    "creative",
    // Other storefronts
    "geniuslink",
    "pd_rd_r",
    "pd_rd_w",
    "pd_rd_wg",
    "pf_rd_p",
    "pf_rd_r",
];

/// Any parameter whose name starts with one of these is dropped.
pub const TRACKING_PREFIXES: &[&str] = &["utm_", "aff_"];

/// Path segments that start a referral tail. Everything from the segment on is cut.
pub const REF_PATH_MARKERS: &[&str] = &["/ref/", "/ref="];

//! Built-in service and infrastructure rule tables.
//!
//! Order matters: the first matching rule wins, so more specific fragments
//! come before broader ones (e.g. `awsglobalaccelerator.com` before
//! `amazonaws.com`).

use std::sync::LazyLock;

use super::models::{MatchRule, RuleTable, ServiceCategory};

/// Version label of the built-in tables
pub const BUILTIN_RULES_VERSION: &str = "builtin-1";

use ServiceCategory::{Analytics, Cloud, Documentation, Email, Feedback, Security};

/// Services identified from the first CNAME hop.
#[rustfmt::skip]
pub static BUILTIN_SERVICE_RULES: LazyLock<RuleTable> = LazyLock::new(|| RuleTable {
    version: BUILTIN_RULES_VERSION.to_string(),
    rules: vec![
        // Identity and access management
        MatchRule::new(&["okta.com"], &[], "Okta", Security, "Identity and access management platform"),
        MatchRule::new(&["auth0.com"], &[], "Auth0", Security, "Identity and access management platform"),
        MatchRule::new(&["onelogin.com"], &[], "OneLogin", Security, "Identity and access management platform"),
        // Email
        MatchRule::new(&["mail", "gmail"], &["google"], "Google Workspace (Gmail)", Email, "Email hosting and productivity suite"),
        MatchRule::new(&["outlook", "office365"], &[], "Microsoft 365 (Outlook)", Email, "Email hosting and productivity suite"),
        MatchRule::new(&["zoho"], &[], "Zoho Mail", Email, "Business email hosting"),
        MatchRule::new(&["sendgrid"], &[], "SendGrid", Email, "Email delivery service"),
        MatchRule::new(&["mailgun"], &[], "Mailgun", Email, "Email API service"),
        // CDN and hosting
        MatchRule::new(&["cloudflare"], &[], "Cloudflare", Cloud, "CDN, security services, and DNS management"),
        MatchRule::new(&["fastly"], &[], "Fastly", Cloud, "CDN service"),
        MatchRule::new(&["akamai"], &[], "Akamai", Cloud, "CDN and security service"),
        MatchRule::new(&["heroku"], &[], "Heroku", Cloud, "Cloud application platform"),
        MatchRule::new(&["netlify"], &[], "Netlify", Cloud, "Static site hosting"),
        MatchRule::new(&["vercel"], &[], "Vercel", Cloud, "Frontend deployment platform"),
        MatchRule::new(&["github"], &[], "GitHub Pages", Cloud, "Static site hosting"),
        // Analytics
        MatchRule::new(&["google-analytics", "gtag"], &[], "Google Analytics", Analytics, "Web analytics service"),
        MatchRule::new(&["mixpanel"], &[], "Mixpanel", Analytics, "Product analytics"),
        MatchRule::new(&["hotjar"], &[], "Hotjar", Analytics, "User behavior analytics"),
        MatchRule::new(&["intercom"], &[], "Intercom", Feedback, "Customer messaging platform"),
        // Security
        MatchRule::new(&["sucuri"], &[], "Sucuri", Security, "Website security service"),
        MatchRule::new(&["incapsula"], &[], "Imperva", Security, "DDoS protection service"),
        // CRM and marketing
        MatchRule::new(&["salesforce"], &[], "Salesforce", Cloud, "Customer relationship management"),
        MatchRule::new(&["hubspot"], &[], "HubSpot", Cloud, "Marketing and CRM platform"),
        MatchRule::new(&["zendesk"], &[], "Zendesk", Feedback, "Customer support platform"),
        MatchRule::new(&["custom.lemlist"], &[], "Lemlist", Cloud, "Email outreach platform"),
        MatchRule::new(&["custom.mailchimp"], &[], "Mailchimp", Cloud, "Email marketing service"),
        // Documentation and feedback
        MatchRule::new(&["gitbook.io"], &[], "GitBook", Documentation, "Documentation platform"),
        MatchRule::new(&["canny.io"], &[], "Canny Feedback", Feedback, "Product feedback platform"),
    ],
});

/// Hosting infrastructure identified from the last CNAME hop.
#[rustfmt::skip]
pub static BUILTIN_INFRASTRUCTURE_RULES: LazyLock<RuleTable> = LazyLock::new(|| RuleTable {
    version: BUILTIN_RULES_VERSION.to_string(),
    rules: vec![
        MatchRule::new(&["awsglobalaccelerator.com"], &[], "AWS Global Accelerator", Cloud, "Global application accelerator"),
        MatchRule::new(&["awsapprunner.com"], &[], "AWS App Runner", Cloud, "Containerized application hosting"),
        MatchRule::new(&["amazonaws.com"], &[], "Amazon Web Services (AWS)", Cloud, "Cloud computing platform"),
        MatchRule::new(&["azurewebsites.net"], &[], "Microsoft Azure", Cloud, "Cloud computing platform"),
        MatchRule::new(&["ondigitalocean.app"], &[], "DigitalOcean App Platform", Cloud, "Application hosting platform"),
        MatchRule::new(&["cloudflare.com"], &[], "Cloudflare", Cloud, "CDN and security services"),
    ],
});

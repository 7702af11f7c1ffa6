pub mod activities;
pub mod ad_accounts;
pub mod ads;
pub mod adsets;
pub mod campaigns;
pub mod creatives;
pub mod insights;

/// Every tool name served by the managers, in catalog order.
pub fn all_tools() -> Vec<&'static str> {
    [
        ad_accounts::TOOLS,
        insights::TOOLS,
        ads::TOOLS,
        adsets::TOOLS,
        campaigns::TOOLS,
        creatives::TOOLS,
        activities::TOOLS,
    ]
    .concat()
}

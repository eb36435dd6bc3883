//! Records returned by the wiki API.

mod attachment;
mod page;
mod version;
mod wiki;

pub use attachment::WikiAttachment;
pub use page::{WikiPage, WikiPageDetail, WikiPageMove, WikiPageMoveParameters, WikiPageStat};
pub use version::{
    GitVersionOptions, GitVersionType, VersionControlRecursionType, VersionDescriptor,
};
pub use wiki::{WikiCreateParameters, WikiType, WikiV2, WikiV2Collection};

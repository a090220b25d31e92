//! Page models
//!
//! The logic layer behind each screen: the dialog state machine, the
//! generic collection page, the singleton contact settings, the user
//! directory, the notification composer, the dashboard aggregator and
//! the public catalog. Every error caught here becomes exactly one
//! user notice.

mod catalog;
mod collection;
mod contact;
mod dashboard;
mod dialog;
mod notice;
mod notifications;
mod users;

pub use catalog::{BrowseContent, Catalog};
pub use collection::{CollectionPage, Confirmation};
pub use contact::ContactSettings;
pub use dashboard::{Dashboard, DashboardCounts};
pub use dialog::{DialogState, FormDialog, Submission};
pub use notice::{Notice, NoticeLevel, NoticeSink};
pub use notifications::NotificationComposer;
pub use users::{UserAccount, UserDirectory};

use std::{
    net::{IpAddr, Ipv4Addr},
    sync::LazyLock,
};

use chrono::{DateTime, TimeZone, Utc};
use folio_models::contact::{ContactMessage, ContactMessageAuthor, ContactSubmission};

pub static CLIENT: LazyLock<IpAddr> =
    LazyLock::new(|| IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7)));

pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2024, 3, 14, 15, 9, 26).unwrap());

pub static SUBMISSION: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Jane Doe".into(),
    email: "jane@example.com".into(),
    subject: "Project inquiry".into(),
    message: "Hello, I would like to discuss a project with you.".into(),
});

pub static MESSAGE: LazyLock<ContactMessage> = LazyLock::new(|| ContactMessage {
    author: ContactMessageAuthor {
        name: "Jane Doe".try_into().unwrap(),
        email: "jane@example.com".parse().unwrap(),
    },
    subject: "Project inquiry".try_into().unwrap(),
    content: "Hello, I would like to discuss a project with you."
        .try_into()
        .unwrap(),
});

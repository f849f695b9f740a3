//! Built-in sample entries shown when the shared store has never been
//! written. Read-only: the gallery never persists these, the admin panel
//! uses them as the starting working list on first login.

use super::entry::{EntryId, PortfolioEntry};
use super::list::PortfolioList;

pub fn seed_entries() -> PortfolioList {
    [
        PortfolioEntry {
            id: EntryId::new(1),
            title: "Neon Dreams".into(),
            category: "Brand Identity".into(),
            image_url: "https://images.unsplash.com/photo-1605810230434-7631ac76ec81?ixlib=rb-4.0.3&q=85&fm=jpg&crop=entropy&cs=srgb&w=640".into(),
            description: Some("A vibrant brand identity project for a music festival.".into()),
            link: None,
        },
        PortfolioEntry {
            id: EntryId::new(2),
            title: "Abstract Waves".into(),
            category: "Digital Art".into(),
            image_url: "https://images.unsplash.com/photo-1527576539890-dfa815648363?ixlib=rb-4.0.3&q=85&fm=jpg&crop=entropy&cs=srgb&w=640".into(),
            description: Some("Abstract digital art piece exploring motion and color.".into()),
            link: None,
        },
        PortfolioEntry {
            id: EntryId::new(3),
            title: "Vibrant Gradients".into(),
            category: "UI Design".into(),
            image_url: "https://images.unsplash.com/photo-1493397212122-2b85dda8106b?ixlib=rb-4.0.3&q=85&fm=jpg&crop=entropy&cs=srgb&w=640".into(),
            description: Some("UI design system using vibrant gradients for a tech startup.".into()),
            link: None,
        },
    ]
    .into_iter()
    .collect()
}

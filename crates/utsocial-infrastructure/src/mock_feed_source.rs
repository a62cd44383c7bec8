//! Synthetic feed source.
//!
//! Stands in for the network-backed feed until the posts API exists. The
//! data set is fixed so screens and demos look the same on every run.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use utsocial_core::error::Result;
use utsocial_core::feed::{Attachment, Career, Comment, FeedSource, Post};
use utsocial_core::user::User;

struct SamplePost {
    id: &'static str,
    content: &'static str,
    career: Career,
    author: (&'static str, &'static str, &'static str),
    attachments: &'static [(&'static str, &'static str, &'static str)],
    created_at: (i32, u32, u32, u32, u32),
    comments: u32,
    reactions: u32,
}

const FEED: &[SamplePost] = &[
    SamplePost {
        id: "post1",
        content: "Just finished implementing a new neural network algorithm for our cybersecurity project. The results are promising! #CyberUT #AI",
        career: Career::SoftwareDevelopment,
        author: ("user123", "cyberhacker", "cyber@example.com"),
        attachments: &[("file1", "neural_network.pdf", "application/pdf")],
        created_at: (2023, 5, 15, 10, 30),
        comments: 3,
        reactions: 5,
    },
    SamplePost {
        id: "post2",
        content: "Our team is looking for students interested in joining the robotics competition next month. DM me if you're interested! #Robotics #UTEngineering",
        career: Career::IndustrialMaintenance,
        author: ("user456", "robotmaster", "robot@example.com"),
        attachments: &[],
        created_at: (2023, 5, 14, 15, 45),
        comments: 7,
        reactions: 12,
    },
    SamplePost {
        id: "post3",
        content: "Check out our new business model canvas for the startup incubator program. Feedback welcome! #BusinessDev #Entrepreneurship",
        career: Career::BusinessDevelopment,
        author: ("user789", "bizwhiz", "business@example.com"),
        attachments: &[("file2", "business_model.png", "image/png")],
        created_at: (2023, 5, 13, 9, 15),
        comments: 4,
        reactions: 8,
    },
    SamplePost {
        id: "post4",
        content: "Just created a fusion dish combining traditional Mexican cuisine with Japanese influences. Here's the recipe and presentation! #Gastronomy #FusionCuisine",
        career: Career::Gastronomy,
        author: ("user101", "chefcreative", "chef@example.com"),
        attachments: &[
            ("file3", "fusion_dish.jpg", "image/jpeg"),
            ("file4", "recipe.pdf", "application/pdf"),
        ],
        created_at: (2023, 5, 12, 18, 20),
        comments: 9,
        reactions: 15,
    },
];

// Author is filled in with the profile owner.
const USER_POSTS: &[SamplePost] = &[
    SamplePost {
        id: "userpost1",
        content: "Just published my research on quantum-resistant encryption algorithms. Check out the paper! #Cybersecurity #QuantumComputing",
        career: Career::SoftwareDevelopment,
        author: ("", "", ""),
        attachments: &[("file1", "quantum_encryption_paper.pdf", "application/pdf")],
        created_at: (2023, 5, 10, 14, 30),
        comments: 8,
        reactions: 15,
    },
    SamplePost {
        id: "userpost2",
        content: "Working on a new neural network architecture for real-time threat detection. Here's a preview of the results so far. #AI #MachineLearning #Security",
        career: Career::SoftwareDevelopment,
        author: ("", "", ""),
        attachments: &[
            ("file2", "neural_network_results.png", "image/png"),
            ("file3", "code_sample.py", "text/plain"),
        ],
        created_at: (2023, 5, 5, 9, 15),
        comments: 12,
        reactions: 23,
    },
    SamplePost {
        id: "userpost3",
        content: "Gave a guest lecture today on ethical hacking and penetration testing. Thanks to everyone who attended! The slides are attached for those who missed it. #EthicalHacking #CyberSecurity #Education",
        career: Career::SoftwareDevelopment,
        author: ("", "", ""),
        attachments: &[("file4", "ethical_hacking_slides.pdf", "application/pdf")],
        created_at: (2023, 4, 28, 16, 45),
        comments: 5,
        reactions: 19,
    },
];

const COMMENTS: &[(&str, (&str, &str, &str), (u32, u32))] = &[
    (
        "This is amazing! Can you share more details about the implementation?",
        ("user456", "techgeek", "tech@example.com"),
        (11, 0),
    ),
    (
        "I've been working on something similar. Let's collaborate!",
        ("user789", "airesearcher", "ai@example.com"),
        (11, 30),
    ),
    (
        "Great work! The university should feature this in the next tech showcase.",
        ("user101", "proftech", "professor@example.com"),
        (12, 15),
    ),
];

fn timestamp((year, month, day, hour, minute): (i32, u32, u32, u32, u32)) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

impl SamplePost {
    fn build(&self, author: User) -> Post {
        Post {
            id: self.id.to_string(),
            content: self.content.to_string(),
            career: self.career,
            author,
            attachments: self
                .attachments
                .iter()
                .map(|(id, name, kind)| Attachment::new(*id, *name, *kind))
                .collect(),
            created_at: timestamp(self.created_at),
            comment_count: self.comments,
            reaction_count: self.reactions,
        }
    }

    fn sample_author(&self) -> User {
        let (id, username, email) = self.author;
        User::new(id, username, email)
    }
}

/// Fixed sample feed with an optional simulated fetch delay.
#[derive(Debug, Clone, Default)]
pub struct MockFeedSource {
    latency: Duration,
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.simulate_latency().await;
        Ok(FEED
            .iter()
            .map(|sample| sample.build(sample.sample_author()))
            .collect())
    }

    async fn fetch_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        Ok(COMMENTS
            .iter()
            .enumerate()
            .map(|(index, (content, (id, username, email), (hour, minute)))| Comment {
                id: format!("{}-comment{}", post_id, index + 1),
                content: content.to_string(),
                author: User::new(*id, *username, *email),
                created_at: timestamp((2023, 5, 15, *hour, *minute)),
            })
            .collect())
    }

    async fn fetch_user_posts(&self, user: &User) -> Result<Vec<Post>> {
        self.simulate_latency().await;
        Ok(USER_POSTS
            .iter()
            .map(|sample| sample.build(user.clone()))
            .collect())
    }
}

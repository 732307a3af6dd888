//! Sitemap generation for sitemap.xml and robots.txt.

use chrono::{DateTime, SecondsFormat, Utc};

use super::posts::PostService;

/// Change-frequency hint of a sitemap entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

/// A hand-maintained page of the site.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticRoute {
    pub path: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl StaticRoute {
    pub fn new(path: impl Into<String>, changefreq: ChangeFreq, priority: f32) -> Self {
        Self {
            path: path.into(),
            changefreq,
            priority,
        }
    }

    /// The site's informational pages.
    pub fn defaults() -> Vec<StaticRoute> {
        vec![
            StaticRoute::new("/", ChangeFreq::Daily, 1.0),
            StaticRoute::new("/about", ChangeFreq::Monthly, 0.6),
            StaticRoute::new("/contact", ChangeFreq::Monthly, 0.5),
            StaticRoute::new("/privacy", ChangeFreq::Yearly, 0.3),
            StaticRoute::new("/terms", ChangeFreq::Yearly, 0.3),
            StaticRoute::new("/disclaimer", ChangeFreq::Yearly, 0.3),
            StaticRoute::new("/blog", ChangeFreq::Daily, 0.8),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: Option<ChangeFreq>,
    pub priority: Option<f32>,
}

/// A generated sitemap.
#[derive(Debug, Clone)]
pub struct Sitemap {
    pub entries: Vec<SitemapEntry>,
    /// False when the post query failed and only static pages are listed.
    pub includes_posts: bool,
}

impl Sitemap {
    /// Render as a sitemaps.org 0.9 document.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for entry in &self.entries {
            xml.push_str("<url>\n");
            xml.push_str(&format!("  <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!(
                    "  <lastmod>{}</lastmod>\n",
                    lastmod.to_rfc3339_opts(SecondsFormat::Millis, true)
                ));
            }
            if let Some(changefreq) = entry.changefreq {
                xml.push_str(&format!("  <changefreq>{}</changefreq>\n", changefreq.as_str()));
            }
            if let Some(priority) = entry.priority {
                xml.push_str(&format!("  <priority>{priority:.1}</priority>\n"));
            }
            xml.push_str("</url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

/// Builds the sitemap from static routes plus every published post.
#[derive(Clone)]
pub struct SitemapGenerator {
    posts: PostService,
    base_url: String,
    static_routes: Vec<StaticRoute>,
}

impl SitemapGenerator {
    pub fn new(posts: PostService, base_url: &str) -> Self {
        Self {
            posts,
            base_url: base_url.trim_end_matches('/').to_string(),
            static_routes: StaticRoute::defaults(),
        }
    }

    /// Generate the sitemap. A content store failure only drops the post entries.
    pub async fn generate(&self) -> Sitemap {
        let mut entries: Vec<SitemapEntry> = self
            .static_routes
            .iter()
            .map(|route| SitemapEntry {
                loc: self.absolute(&route.path),
                lastmod: None,
                changefreq: Some(route.changefreq),
                priority: Some(route.priority),
            })
            .collect();

        let includes_posts = match self.posts.list_published(None).await {
            Ok(posts) => {
                entries.extend(posts.iter().map(|post| SitemapEntry {
                    loc: self.absolute(&format!("/blog/{}", post.slug)),
                    lastmod: Some(post.last_modified()),
                    changefreq: Some(ChangeFreq::Daily),
                    priority: Some(0.7),
                }));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sitemap post query failed; emitting static pages only");
                false
            }
        };

        Sitemap {
            entries,
            includes_posts,
        }
    }

    /// robots.txt allowing public pages and pointing at the sitemap.
    pub fn robots_txt(&self) -> String {
        format!(
            "User-agent: *\nAllow: /\nDisallow: /admin\nDisallow: /login\nSitemap: {}\n",
            self.absolute("/sitemap.xml")
        )
    }

    fn absolute(&self, path: &str) -> String {
        if path == "/" || path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! Site model - the root context passed to every render call

use anyhow::Result;
use serde_json::{json, Map, Value};
use std::path::Path;
use tera::Context;

use crate::content::{ContentLoader, ContentRecord};

/// In-memory aggregate of configuration, pages, and posts.
///
/// Built once per run; posts are sorted and cross-linked by the loader
/// before the model exists, so the model is read-only from here on.
pub struct SiteModel {
    /// Site-wide metadata copied from the configuration.
    pub site_info: Map<String, Value>,

    /// Pages in directory-walk order.
    pub pages: Vec<ContentRecord>,

    /// Posts sorted by date descending, neighbors linked.
    pub posts: Vec<ContentRecord>,
}

impl SiteModel {
    /// Load pages and posts and assemble the model.
    pub fn load(
        loader: &ContentLoader,
        site_info: Map<String, Value>,
        pages_dir: &Path,
        posts_dir: &Path,
    ) -> Result<Self> {
        let pages = loader.load_pages(pages_dir)?;
        let posts = loader.load_posts(posts_dir)?;
        Ok(Self {
            site_info,
            pages,
            posts,
        })
    }

    /// Context with the `site` object only, for the home page.
    pub fn base_context(&self) -> Result<Context> {
        let mut ctx = Context::new();
        ctx.insert("site", &self.site_value()?);
        Ok(ctx)
    }

    /// Context for one page: `site` plus `page`.
    pub fn page_context(&self, index: usize) -> Result<Context> {
        let mut ctx = self.base_context()?;
        ctx.insert("page", &self.pages[index]);
        Ok(ctx)
    }

    /// Context for one post: `site` plus `post` with its neighbors
    /// resolved.
    pub fn post_context(&self, index: usize) -> Result<Context> {
        let mut ctx = self.base_context()?;
        ctx.insert("post", &self.post_value(index)?);
        Ok(ctx)
    }

    /// The `site` object: site_info fields plus `pages` and `posts`.
    fn site_value(&self) -> Result<Value> {
        let mut site = self.site_info.clone();
        site.insert("pages".to_string(), serde_json::to_value(&self.pages)?);

        let posts = (0..self.posts.len())
            .map(|i| self.post_value(i))
            .collect::<Result<Vec<_>>>()?;
        site.insert("posts".to_string(), Value::Array(posts));

        Ok(Value::Object(site))
    }

    /// Serialize one post, resolving `previous`/`next` indices into
    /// shallow neighbor views so the value never recurses.
    fn post_value(&self, index: usize) -> Result<Value> {
        let post = &self.posts[index];
        let mut value = serde_json::to_value(post)?;
        if let Value::Object(obj) = &mut value {
            obj.insert(
                "previous".to_string(),
                neighbor_value(post.previous_in(&self.posts)),
            );
            obj.insert(
                "next".to_string(),
                neighbor_value(post.next_in(&self.posts)),
            );
        }
        Ok(value)
    }
}

/// Shallow view of a neighboring post: enough for navigation links.
fn neighbor_value(neighbor: Option<&ContentRecord>) -> Value {
    match neighbor {
        Some(post) => json!({
            "date": post.date,
            "permalink": post.permalink,
            "title": post.meta_value("title"),
        }),
        None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn post(date: &str, title: &str) -> ContentRecord {
        let mut meta = IndexMap::new();
        meta.insert("title".to_string(), title.to_string());
        ContentRecord {
            meta,
            date: Some(date.to_string()),
            permalink: Some(format!("/{}/x.html", date.replace('-', "/"))),
            ..Default::default()
        }
    }

    fn model() -> SiteModel {
        let mut posts = vec![
            post("2023-01-03", "third"),
            post("2023-01-02", "second"),
            post("2023-01-01", "first"),
        ];
        posts[0].next = Some(1);
        posts[1].previous = Some(0);
        posts[1].next = Some(2);
        posts[2].previous = Some(1);

        let mut site_info = Map::new();
        site_info.insert("title".to_string(), Value::from("Test Site"));

        SiteModel {
            site_info,
            pages: Vec::new(),
            posts,
        }
    }

    #[test]
    fn test_site_value_shape() {
        let value = model().site_value().unwrap();
        assert_eq!(value["title"], "Test Site");
        assert_eq!(value["posts"].as_array().unwrap().len(), 3);
        assert!(value["pages"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_post_neighbors_resolved() {
        let value = model().post_value(1).unwrap();
        assert_eq!(value["previous"]["title"], "third");
        assert_eq!(value["next"]["title"], "first");
        assert_eq!(value["next"]["date"], "2023-01-01");
    }

    #[test]
    fn test_boundary_neighbors_are_null() {
        let m = model();
        assert!(m.post_value(0).unwrap()["previous"].is_null());
        assert!(m.post_value(2).unwrap()["next"].is_null());
    }

    #[test]
    fn test_post_context_renders() {
        let ctx = model().post_context(1).unwrap();
        let json = ctx.into_json();
        assert_eq!(json["post"]["title"], "second");
        assert_eq!(json["site"]["title"], "Test Site");
    }
}

//! Typed shape of the site-configuration document.
//!
//! Top-level site fields and products are strongly typed. Page layouts vary
//! per page and stay a generic [`Document`].

use serde::{Deserialize, Serialize};

/// Untyped document tree used for page-specific layout blocks.
pub type Document = serde_json::Value;

/// Root of the document served at `/api/site`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    pub site: Site,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub name: String,
    pub url: String,
    pub description: String,
    pub language: String,
    pub visual: Visual,
    pub global_header: GlobalHeader,
    pub global_footer: GlobalFooter,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// Theming tokens.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visual {
    pub brand_colors: BrandColors,
    pub type_scale: TypeScale,
    pub font_families: FontFamilies,
    pub corner_radius: String,
    pub shadow: String,
    pub image_style: ImageStyle,
    pub animations: Animations,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub bg: String,
    pub muted: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TypeScale {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub body: String,
    pub small: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FontFamilies {
    pub headline: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStyle {
    pub cover: bool,
    pub rounded: bool,
    pub alt_overlay: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animations {
    pub micro: String,
    pub hover_lift: String,
    pub fade: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalHeader {
    pub logo: Logo,
    pub top_nav: Vec<NavLink>,
    pub utility_nav: Vec<NavItem>,
    pub behavior: HeaderBehavior,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Logo {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NavLink {
    pub label: String,
    pub route: String,
}

/// A utility-bar entry: either a route or a client-side action.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NavItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBehavior {
    pub sticky: bool,
    pub shrink_on_scroll: bool,
    pub mobile_hamburger: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GlobalFooter {
    pub columns: Vec<FooterColumn>,
    pub copyright: String,
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    pub aria_label: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub route: String,
    pub title: String,
    pub meta: PageMeta,
    pub layout: Document,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_data: Option<MockData>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Sample data attached to the shop page.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MockData {
    pub pagination: Pagination,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

/// A catalog entry. `price` is a display string; no arithmetic is done on it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub short_description: String,
    pub availability: String,
}

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::cmp::Ordering;

pub const PLACEHOLDER_TEXT: &str = "Loading artworks...";
pub const SOLD_TEXT: &str = "SOLD";
pub const AVAILABLE_TEXT: &str = "Available";

/// One entry of the artwork manifest. Fields that are missing, null or of
/// the wrong type fall back to empty values instead of rejecting the record.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artwork {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub year: String,
    #[serde(deserialize_with = "text")]
    pub medium: String,
    #[serde(deserialize_with = "text")]
    pub dimensions: String,
    #[serde(deserialize_with = "optional_text")]
    pub description: Option<String>,
    #[serde(alias = "thumbnailRef", deserialize_with = "text")]
    pub thumbnail_url: String,
    #[serde(alias = "imageRef", deserialize_with = "text")]
    pub image_url: String,
    #[serde(deserialize_with = "flag")]
    pub sold: bool,
}

fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(optional_text(d)?.unwrap_or_default())
}

// numbers are kept as written, e.g. a numeric year
fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(d)?, Value::Bool(true)))
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to load artwork manifest ({status})")]
    Http { status: u16 },
    #[error("failed to fetch artwork manifest: {0}")]
    Transport(String),
    #[error("failed to parse artwork manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything outside 2xx is a failed load.
#[inline]
pub fn check_status(status: u16) -> Result<(), ManifestError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ManifestError::Http { status })
    }
}

/// Parse the manifest body. Only a body that is not a JSON array fails;
/// entries that are not objects are skipped with a warning.
pub fn parse_manifest(text: &str) -> Result<Vec<Artwork>, ManifestError> {
    let entries: Vec<Value> = serde_json::from_str(text)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match Artwork::deserialize(entry) {
            Ok(a) => Some(a),
            Err(e) => {
                log::warn!("[gallery] skipping manifest entry {}: {}", i, e);
                None
            }
        })
        .collect())
}

/// Everything the detail overlay shows for one artwork.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailView {
    pub image_url: String,
    pub title: String,
    pub year: String,
    pub medium: String,
    pub dimensions: String,
    pub description: Option<String>,
    pub status: &'static str,
}

impl From<&Artwork> for DetailView {
    fn from(a: &Artwork) -> Self {
        Self {
            image_url: a.image_url.clone(),
            title: a.title.clone(),
            year: a.year.clone(),
            medium: a.medium.clone(),
            dimensions: a.dimensions.clone(),
            description: a.description.clone().filter(|d| !d.is_empty()),
            status: if a.sold { SOLD_TEXT } else { AVAILABLE_TEXT },
        }
    }
}

/// One thumbnail tile in the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct TileView {
    pub thumbnail_url: String,
    pub alt: String,
    pub sold_label: &'static str,
    pub detail: DetailView,
}

impl From<&Artwork> for TileView {
    fn from(a: &Artwork) -> Self {
        Self {
            thumbnail_url: a.thumbnail_url.clone(),
            alt: a.title.clone(),
            sold_label: if a.sold { SOLD_TEXT } else { "" },
            detail: DetailView::from(a),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GalleryLayout {
    Placeholder,
    Tiles(Vec<TileView>),
}

impl GalleryLayout {
    /// Detail views in tile order; a tile's index selects its entry.
    pub fn details(&self) -> Vec<DetailView> {
        match self {
            GalleryLayout::Placeholder => Vec::new(),
            GalleryLayout::Tiles(tiles) => tiles.iter().map(|t| t.detail.clone()).collect(),
        }
    }
}

/// Named predicates selectable from page markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtworkFilter {
    Available,
    Sold,
}

impl ArtworkFilter {
    /// `None` for "all" and for unrecognized names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "available" => Some(Self::Available),
            "sold" => Some(Self::Sold),
            _ => None,
        }
    }

    pub fn matches(self, artwork: &Artwork) -> bool {
        match self {
            Self::Available => !artwork.sold,
            Self::Sold => artwork.sold,
        }
    }
}

/// Named orderings selectable from page markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtworkSort {
    Title,
    TitleDesc,
    Year,
    YearDesc,
}

impl ArtworkSort {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "title-desc" => Some(Self::TitleDesc),
            "year" => Some(Self::Year),
            "year-desc" => Some(Self::YearDesc),
            _ => None,
        }
    }

    pub fn compare(self, a: &Artwork, b: &Artwork) -> Ordering {
        match self {
            Self::Title => a.title.cmp(&b.title),
            Self::TitleDesc => b.title.cmp(&a.title),
            Self::Year => year_key(a).cmp(&year_key(b)),
            Self::YearDesc => year_key(b).cmp(&year_key(a)),
        }
    }
}

// numeric years order by value; anything else sorts before them, as text
fn year_key(a: &Artwork) -> (Option<i64>, &str) {
    (a.year.trim().parse().ok(), a.year.as_str())
}

type Filter<'a> = Box<dyn Fn(&Artwork) -> bool + 'a>;
type Comparator<'a> = Box<dyn Fn(&Artwork, &Artwork) -> Ordering + 'a>;

/// Optional predicate and ordering applied to a working copy of the list.
#[derive(Default)]
pub struct RenderOptions<'a> {
    filter: Option<Filter<'a>>,
    sort: Option<Comparator<'a>>,
}

impl<'a> RenderOptions<'a> {
    pub fn filter(mut self, f: impl Fn(&Artwork) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(f));
        self
    }

    pub fn sort(mut self, cmp: impl Fn(&Artwork, &Artwork) -> Ordering + 'a) -> Self {
        self.sort = Some(Box::new(cmp));
        self
    }

    /// Options named by the gallery container's `data-filter` and
    /// `data-sort` attributes. Unknown names are logged and ignored.
    pub fn from_attrs(filter: Option<&str>, sort: Option<&str>) -> Self {
        let mut options = Self::default();
        if let Some(name) = filter {
            match ArtworkFilter::from_name(name) {
                Some(f) => options = options.filter(move |a| f.matches(a)),
                None if name.trim().eq_ignore_ascii_case("all") => {}
                None => log::warn!("[gallery] unknown filter {:?}", name),
            }
        }
        if let Some(name) = sort {
            match ArtworkSort::from_name(name) {
                Some(order) => options = options.sort(move |a, b| order.compare(a, b)),
                None => log::warn!("[gallery] unknown sort {:?}", name),
            }
        }
        options
    }
}

/// Loaded artwork list plus readiness flag.
#[derive(Default, Debug)]
pub struct Gallery {
    artworks: Vec<Artwork>,
    ready: bool,
}

impl Gallery {
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[inline]
    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    /// Record the outcome of a load. A failure leaves the gallery empty and
    /// not ready, and is handed back to the caller.
    pub fn apply_load(
        &mut self,
        result: Result<Vec<Artwork>, ManifestError>,
    ) -> Result<&[Artwork], ManifestError> {
        match result {
            Ok(list) => {
                log::info!("[gallery] loaded {} artworks", list.len());
                self.artworks = list;
                self.ready = true;
                Ok(&self.artworks)
            }
            Err(e) => {
                log::error!("[gallery] error loading artworks: {}", e);
                self.artworks.clear();
                self.ready = false;
                Err(e)
            }
        }
    }

    /// Build the tile list for the current data. The stored list is never
    /// reordered.
    pub fn layout(&self, options: &RenderOptions<'_>) -> GalleryLayout {
        if !self.ready || self.artworks.is_empty() {
            return GalleryLayout::Placeholder;
        }
        let mut shown: Vec<&Artwork> = match &options.filter {
            Some(f) => self.artworks.iter().filter(|&a| f(a)).collect(),
            None => self.artworks.iter().collect(),
        };
        if let Some(cmp) = &options.sort {
            shown.sort_by(|a, b| cmp(*a, *b));
        }
        GalleryLayout::Tiles(shown.into_iter().map(TileView::from).collect())
    }
}

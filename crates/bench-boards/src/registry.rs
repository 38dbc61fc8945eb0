//! Immutable, ordered registry of job-board platforms.

use crate::{
    definition::PlatformDescriptor,
    error::{BoardError, Result},
    loader,
};
use bench_core::{PlatformId, SearchCategory};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Ordered catalogue of platforms with lookup by ID.
///
/// The registry never changes after construction; share it with `Arc`.
/// Iteration order is catalogue order, which fixes the order of generated
/// queries.
#[derive(Debug, Clone)]
pub struct BoardRegistry {
    platforms: Vec<PlatformDescriptor>,
    index: HashMap<PlatformId, usize>,
}

impl BoardRegistry {
    /// Build a registry from validated platform definitions.
    ///
    /// # Errors
    /// Returns error if a definition is invalid or an ID appears twice.
    pub fn new(platforms: Vec<PlatformDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(platforms.len());

        for (position, platform) in platforms.iter().enumerate() {
            platform.validate()?;
            if index.insert(platform.id.clone(), position).is_some() {
                return Err(BoardError::DuplicatePlatform {
                    platform_id: platform.id.to_string(),
                });
            }
        }

        Ok(Self { platforms, index })
    }

    /// The catalogue embedded in the crate.
    pub fn builtin() -> Result<Self> {
        let registry = Self::new(loader::parse_catalogue(
            loader::BUILTIN_CATALOGUE,
            "builtin",
        )?)?;
        info!(
            platforms = registry.len(),
            "loaded built-in board catalogue"
        );
        Ok(registry)
    }

    /// Load a catalogue file in the built-in format.
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::new(loader::load_file(path)?)
    }

    /// Use `path` when given, otherwise the built-in catalogue.
    pub fn from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => Self::builtin(),
        }
    }

    /// All platforms in catalogue order.
    #[must_use]
    pub fn platforms(&self) -> &[PlatformDescriptor] {
        &self.platforms
    }

    /// Get a platform by ID.
    ///
    /// # Errors
    /// Returns `UnknownPlatform` if the ID is not registered.
    pub fn get(&self, platform_id: &PlatformId) -> Result<&PlatformDescriptor> {
        self.index
            .get(platform_id)
            .map(|&position| &self.platforms[position])
            .ok_or_else(|| BoardError::UnknownPlatform {
                platform_id: platform_id.to_string(),
            })
    }

    /// Get a platform by its string ID.
    pub fn get_str(&self, platform_id: &str) -> Result<&PlatformDescriptor> {
        let id = PlatformId::new(platform_id).map_err(|_| BoardError::UnknownPlatform {
            platform_id: platform_id.to_string(),
        })?;
        self.get(&id)
    }

    /// Check if a platform is registered.
    #[must_use]
    pub fn contains(&self, platform_id: &PlatformId) -> bool {
        self.index.contains_key(platform_id)
    }

    /// Platforms registered for `category`, in catalogue order.
    pub fn for_category(
        &self,
        category: SearchCategory,
    ) -> impl Iterator<Item = &PlatformDescriptor> + '_ {
        self.platforms.iter().filter(move |p| p.serves(category))
    }

    /// Number of platforms registered for each category.
    ///
    /// Every category is present, with zero when no platform serves it.
    #[must_use]
    pub fn count_by_category(&self) -> HashMap<SearchCategory, usize> {
        SearchCategory::ALL
            .iter()
            .map(|&category| (category, self.for_category(category).count()))
            .collect()
    }

    /// All platform IDs in catalogue order.
    #[must_use]
    pub fn ids(&self) -> Vec<&PlatformId> {
        self.platforms.iter().map(PlatformDescriptor::id).collect()
    }

    /// Total number of platforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    /// Whether the registry has no platforms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Render a platform's native search URL.
    ///
    /// # Errors
    /// Returns `UnknownPlatform` if the ID is not registered.
    pub fn native_search_url(
        &self,
        platform_id: &PlatformId,
        phrase: &str,
        location: Option<&str>,
    ) -> Result<String> {
        Ok(self.get(platform_id)?.native_url(phrase, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(id: &str, categories: &[SearchCategory]) -> PlatformDescriptor {
        PlatformDescriptor {
            id: PlatformId::new(id).expect("valid platform ID"),
            name: format!("Test {id}"),
            site: format!("{id}.example.com"),
            search_url: format!("https://{id}.example.com/search?q={{query}}"),
            categories: categories.to_vec(),
            modifiers: Vec::new(),
            category_modifiers: Vec::new(),
            priority: 2,
        }
    }

    #[test]
    fn test_builtin_counts() {
        let registry = BoardRegistry::builtin().expect("load builtin registry");
        let counts = registry.count_by_category();
        assert_eq!(counts[&SearchCategory::JobSearch], 12);
        assert_eq!(counts[&SearchCategory::VendorHunt], 6);
        assert_eq!(counts[&SearchCategory::ContactFind], 5);
        assert_eq!(counts.values().sum::<usize>(), 23);
    }

    #[test]
    fn test_builtin_job_search_order() {
        let registry = BoardRegistry::builtin().expect("load builtin registry");
        let ids: Vec<&str> = registry
            .for_category(SearchCategory::JobSearch)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "linkedin-jobs",
                "linkedin-posts",
                "dice",
                "indeed",
                "monster",
                "careerbuilder",
                "ziprecruiter",
                "glassdoor",
                "techfetch",
                "c2c-requirements",
                "governmentjobs",
                "usajobs",
            ]
        );
    }

    #[test]
    fn test_get_and_contains() {
        let registry = BoardRegistry::new(vec![platform("alpha", &[SearchCategory::JobSearch])])
            .expect("build registry");
        let id = PlatformId::new("alpha").expect("valid platform ID");
        assert!(registry.contains(&id));
        assert_eq!(registry.get(&id).expect("get platform").name(), "Test alpha");
        assert_eq!(registry.get_str("alpha").expect("get platform").id(), &id);
    }

    #[test]
    fn test_unknown_platform() {
        let registry = BoardRegistry::new(Vec::new()).expect("build registry");
        let id = PlatformId::new("nonexistent").expect("valid platform ID");
        assert!(matches!(
            registry.get(&id),
            Err(BoardError::UnknownPlatform { .. })
        ));
        assert!(matches!(
            registry.get_str("Not An Id"),
            Err(BoardError::UnknownPlatform { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = BoardRegistry::new(vec![
            platform("alpha", &[SearchCategory::JobSearch]),
            platform("alpha", &[SearchCategory::VendorHunt]),
        ]);
        assert!(matches!(
            result,
            Err(BoardError::DuplicatePlatform { ref platform_id }) if platform_id == "alpha"
        ));
    }

    #[test]
    fn test_invalid_definition_rejected() {
        let mut bad = platform("alpha", &[SearchCategory::JobSearch]);
        bad.categories.clear();
        assert!(BoardRegistry::new(vec![bad]).is_err());
    }

    #[test]
    fn test_count_by_category_includes_zero() {
        let registry = BoardRegistry::new(vec![platform("alpha", &[SearchCategory::JobSearch])])
            .expect("build registry");
        let counts = registry.count_by_category();
        assert_eq!(counts[&SearchCategory::JobSearch], 1);
        assert_eq!(counts[&SearchCategory::ContactFind], 0);
    }

    #[test]
    fn test_ids_in_order() {
        let registry = BoardRegistry::new(vec![
            platform("zeta", &[SearchCategory::JobSearch]),
            platform("alpha", &[SearchCategory::JobSearch]),
        ])
        .expect("build registry");
        let ids: Vec<&str> = registry.ids().into_iter().map(PlatformId::as_str).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_native_search_url() {
        let registry = BoardRegistry::builtin().expect("load builtin registry");
        let id = PlatformId::new("indeed").expect("valid platform ID");
        let url = registry
            .native_search_url(&id, "java developer c2c", Some("Austin, TX"))
            .expect("render URL");
        assert_eq!(
            url,
            "https://www.indeed.com/jobs?q=java%20developer%20c2c&l=Austin%2C%20TX&radius=50&jt=contract"
        );
    }
}

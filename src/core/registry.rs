use std::collections::HashMap;

/// 一個州 (或華盛頓特區)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub code: String,
    pub name: String,
    pub fips: u32,
}

impl Region {
    pub fn new(code: &str, name: &str, fips: u32) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            fips,
        }
    }
}

// (FIPS, USPS, 名稱)
const US_STATES: [(u32, &str, &str); 51] = [
    (1, "AL", "Alabama"),
    (2, "AK", "Alaska"),
    (4, "AZ", "Arizona"),
    (5, "AR", "Arkansas"),
    (6, "CA", "California"),
    (8, "CO", "Colorado"),
    (9, "CT", "Connecticut"),
    (10, "DE", "Delaware"),
    (11, "DC", "District of Columbia"),
    (12, "FL", "Florida"),
    (13, "GA", "Georgia"),
    (15, "HI", "Hawaii"),
    (16, "ID", "Idaho"),
    (17, "IL", "Illinois"),
    (18, "IN", "Indiana"),
    (19, "IA", "Iowa"),
    (20, "KS", "Kansas"),
    (21, "KY", "Kentucky"),
    (22, "LA", "Louisiana"),
    (23, "ME", "Maine"),
    (24, "MD", "Maryland"),
    (25, "MA", "Massachusetts"),
    (26, "MI", "Michigan"),
    (27, "MN", "Minnesota"),
    (28, "MS", "Mississippi"),
    (29, "MO", "Missouri"),
    (30, "MT", "Montana"),
    (31, "NE", "Nebraska"),
    (32, "NV", "Nevada"),
    (33, "NH", "New Hampshire"),
    (34, "NJ", "New Jersey"),
    (35, "NM", "New Mexico"),
    (36, "NY", "New York"),
    (37, "NC", "North Carolina"),
    (38, "ND", "North Dakota"),
    (39, "OH", "Ohio"),
    (40, "OK", "Oklahoma"),
    (41, "OR", "Oregon"),
    (42, "PA", "Pennsylvania"),
    (44, "RI", "Rhode Island"),
    (45, "SC", "South Carolina"),
    (46, "SD", "South Dakota"),
    (47, "TN", "Tennessee"),
    (48, "TX", "Texas"),
    (49, "UT", "Utah"),
    (50, "VT", "Vermont"),
    (51, "VA", "Virginia"),
    (53, "WA", "Washington"),
    (54, "WV", "West Virginia"),
    (55, "WI", "Wisconsin"),
    (56, "WY", "Wyoming"),
];

/// 區域代碼、FIPS 與名稱之間的雙向對照表
#[derive(Debug, Clone)]
pub struct RegionRegistry {
    regions: Vec<Region>,
    by_code: HashMap<String, usize>,
    by_fips: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
}

impl RegionRegistry {
    pub fn new(regions: Vec<Region>) -> Self {
        let mut by_code = HashMap::new();
        let mut by_fips = HashMap::new();
        let mut by_name = HashMap::new();

        for (index, region) in regions.iter().enumerate() {
            by_code.insert(region.code.clone(), index);
            by_fips.insert(region.fips, index);
            by_name.insert(region.name.to_lowercase(), index);
        }

        Self {
            regions,
            by_code,
            by_fips,
            by_name,
        }
    }

    /// 50 州加上華盛頓特區
    pub fn us_states() -> Self {
        Self::new(
            US_STATES
                .iter()
                .map(|(fips, code, name)| Region::new(code, name, *fips))
                .collect(),
        )
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn by_code(&self, code: &str) -> Option<&Region> {
        self.by_code.get(code).map(|&i| &self.regions[i])
    }

    pub fn by_fips(&self, fips: u32) -> Option<&Region> {
        self.by_fips.get(&fips).map(|&i| &self.regions[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&Region> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.regions[i])
    }

    /// 地圖圖徵先以數字 id 查找，失敗再用名稱
    pub fn resolve_feature(&self, id: Option<&str>, name: Option<&str>) -> Option<&Region> {
        id.and_then(|raw| raw.trim().parse::<u32>().ok())
            .and_then(|fips| self.by_fips(fips))
            .or_else(|| name.and_then(|n| self.by_name(n)))
    }

    /// 以名稱或代碼的前綴搜尋 (不分大小寫)，回傳第一個符合者
    pub fn search(&self, query: &str) -> Option<&Region> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }
        self.regions.iter().find(|r| {
            r.name.to_lowercase().starts_with(&q) || r.code.to_lowercase().starts_with(&q)
        })
    }
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::us_states()
    }
}

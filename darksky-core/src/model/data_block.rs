use serde::Serialize;

use crate::{
    decode::{Fields, Object},
    error::DecodeError,
    model::DataPoint,
    vocabulary::Icon,
};

/// Ordered series of data points for one forecast section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataBlock {
    /// Ordered by time.
    pub data: Vec<DataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

impl DataBlock {
    pub fn from_json(json: &Object) -> Result<Self, DecodeError> {
        let f = Fields::new("DataBlock", json);

        let data = f
            .objects("data")?
            .into_iter()
            .enumerate()
            .map(|(i, point)| {
                DataPoint::from_json(point)
                    .map_err(|e| DecodeError::nested("DataBlock", format!("data[{i}]"), e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            data,
            summary: f.opt_string("summary"),
            icon: f.opt_code("icon", Icon::from_code),
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.data.iter()
    }
}

impl<'a> IntoIterator for &'a DataBlock {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

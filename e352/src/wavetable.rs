//! A single 256-sample waveform slot within a [`Bank`](crate::bank::Bank)

use std::ops::RangeInclusive;
use thiserror::Error;
use ux::u6;

/// The number of values in a single wavetable
pub const TABLE_LEN: usize = 256;

/// The values a wavetable may be set to
///
/// This is one short of the full `i16` range: the module treats `-32768` as out of bounds.
pub const VALUE_RANGE: RangeInclusive<i32> = -32767..=32767;

/// One waveform slot within a [`Bank`](crate::bank::Bank)
///
/// Wavetables are views into a bank; the bank owns the actual values. A view knows which slot
/// it was taken from, so [`Wavetable::index()`] always reports the slot the values live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wavetable<'a> {
    index: u6,
    values: &'a [i16; TABLE_LEN],
}

impl<'a> Wavetable<'a> {
    pub(crate) fn new(index: u6, values: &'a [i16; TABLE_LEN]) -> Self {
        Self { index, values }
    }

    /// The current contents of the table
    pub fn values(&self) -> &'a [i16; TABLE_LEN] {
        self.values
    }

    /// The position of this table within its bank (0-63)
    pub fn index(&self) -> u6 {
        self.index
    }
}

/// Mutable access to one waveform slot within a [`Bank`](crate::bank::Bank)
///
/// Every mutation goes through the same bounds check, so all values stay within
/// [`VALUE_RANGE`].
///
/// ```
/// # use e352::bank::Bank;
/// let mut bank = Bank::new();
///
/// for mut table in bank.tables_mut() {
///     table.init_values(-32767)?;
///     table.set_value(0, 32767)?;
/// }
///
/// assert_eq!(bank.table(e352::u6::new(10)).values()[0], 32767);
/// # Ok::<(), e352::wavetable::TableError>(())
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct WavetableMut<'a> {
    index: u6,
    values: &'a mut [i16; TABLE_LEN],
}

impl<'a> WavetableMut<'a> {
    pub(crate) fn new(index: u6, values: &'a mut [i16; TABLE_LEN]) -> Self {
        Self { index, values }
    }

    /// The current contents of the table
    pub fn values(&self) -> &[i16; TABLE_LEN] {
        self.values
    }

    /// The position of this table within its bank (0-63)
    pub fn index(&self) -> u6 {
        self.index
    }

    /// Set all values in the table to the same value
    pub fn init_values<V>(&mut self, value: V) -> Result<(), TableError>
    where
        V: Into<i32>,
    {
        let value = check_value(value.into())?;
        *self.values = [value; TABLE_LEN];

        Ok(())
    }

    /// Set the value at a specific position (0-255)
    pub fn set_value<V>(&mut self, position: usize, value: V) -> Result<(), TableError>
    where
        V: Into<i32>,
    {
        let value = check_value(value.into())?;

        let slot = self
            .values
            .get_mut(position)
            .ok_or(TableError::PositionOutOfRange { position })?;
        *slot = value;

        Ok(())
    }

    /// Replace the entire table at once
    ///
    /// The whole slice is validated before anything is written, so on failure the table
    /// keeps its previous contents.
    pub fn set_values<V>(&mut self, values: &[V]) -> Result<(), TableError>
    where
        V: Copy + Into<i32>,
    {
        if values.len() != TABLE_LEN {
            return Err(TableError::WrongLength { len: values.len() });
        }

        let mut checked = [0; TABLE_LEN];
        for (dest, value) in checked.iter_mut().zip(values) {
            *dest = check_value((*value).into())?;
        }

        *self.values = checked;

        Ok(())
    }
}

fn check_value(value: i32) -> Result<i16, TableError> {
    if VALUE_RANGE.contains(&value) {
        Ok(value as i16)
    } else {
        Err(TableError::ValueOutOfRange { value })
    }
}

/// Errors that can result from mutating a [`WavetableMut`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// Table values have to lie within [`VALUE_RANGE`]
    #[error("Table value {value} is not between -32767 and 32767")]
    ValueOutOfRange { value: i32 },

    /// Positions have to lie within 0-255
    #[error("Position {position} is not between 0 and 255")]
    PositionOutOfRange { position: usize },

    /// Whole-table updates need exactly [`TABLE_LEN`] values
    #[error("Expected exactly 256 table values, got {len}")]
    WrongLength { len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_table<F>(values: &mut [i16; TABLE_LEN], f: F)
    where
        F: FnOnce(&mut WavetableMut),
    {
        f(&mut WavetableMut::new(u6::new(3), values))
    }

    #[test]
    fn index() {
        let mut values = [0; TABLE_LEN];
        assert_eq!(Wavetable::new(u6::new(9), &values).index(), u6::new(9));
        assert_eq!(WavetableMut::new(u6::new(3), &mut values).index(), u6::new(3));
    }

    #[test]
    fn init_values() {
        let mut values = [7; TABLE_LEN];
        with_table(&mut values, |table| {
            assert_eq!(
                table.init_values(32768),
                Err(TableError::ValueOutOfRange { value: 32768 })
            );
            assert_eq!(
                table.init_values(-32768),
                Err(TableError::ValueOutOfRange { value: -32768 })
            );
        });
        assert_eq!(values, [7; TABLE_LEN]);
    }

    #[test]
    fn set_value() {
        let mut values = [0; TABLE_LEN];
        with_table(&mut values, |table| {
            table.set_value(0, -32767).unwrap();
            table.set_value(255, 32767).unwrap();
            table.set_value(128, 42i16).unwrap();
        });

        assert_eq!(values[0], -32767);
        assert_eq!(values[255], 32767);
        assert_eq!(values[128], 42);
        assert_eq!(values.iter().filter(|v| **v != 0).count(), 3);
    }

    #[test]
    fn set_values() {
        let mut values = [0; TABLE_LEN];
        let ramp: Vec<i32> = (0..256).map(|i| i * 256 - 32767).collect();
        with_table(&mut values, |table| table.set_values(&ramp).unwrap());

        assert_eq!(values[0], -32767);
        assert_eq!(values[255], 32513);

        with_table(&mut values, |table| {
            assert_eq!(
                table.set_values(&[0i32; 255]),
                Err(TableError::WrongLength { len: 255 })
            );
            assert_eq!(
                table.set_values(&[i16::MIN; 256]),
                Err(TableError::ValueOutOfRange { value: -32768 })
            );
        });
        assert_eq!(values[255], 32513);
    }

    fn in_range() -> impl Strategy<Value = i32> {
        VALUE_RANGE
    }

    fn out_of_range() -> impl Strategy<Value = i32> {
        prop_oneof![i32::MIN..=-32768, 32768..=i32::MAX]
    }

    fn any_table() -> impl Strategy<Value = [i16; TABLE_LEN]> {
        prop::collection::vec(-32767i16..=32767, TABLE_LEN)
            .prop_map(|values| values.try_into().unwrap())
    }

    proptest! {
        #[test]
        fn init_values_fills_the_table(before in any_table(), value in in_range()) {
            let mut values = before;
            with_table(&mut values, |table| table.init_values(value).unwrap());
            prop_assert!(values.iter().all(|v| i32::from(*v) == value));
        }

        #[test]
        fn init_values_out_of_range(before in any_table(), value in out_of_range()) {
            let mut values = before;
            with_table(&mut values, |table| {
                assert_eq!(table.init_values(value), Err(TableError::ValueOutOfRange { value }));
            });
            prop_assert_eq!(values, before);
        }

        #[test]
        fn set_value_touches_one_position(
            before in any_table(),
            position in 0usize..TABLE_LEN,
            value in in_range(),
        ) {
            let mut values = before;
            with_table(&mut values, |table| table.set_value(position, value).unwrap());

            for (index, (old, new)) in before.iter().zip(&values).enumerate() {
                if index == position {
                    prop_assert_eq!(i32::from(*new), value);
                } else {
                    prop_assert_eq!(old, new);
                }
            }
        }

        #[test]
        fn set_value_rejects_bad_input(
            before in any_table(),
            position in 0usize..512,
            value in prop_oneof![in_range(), out_of_range()],
        ) {
            prop_assume!(position >= TABLE_LEN || !VALUE_RANGE.contains(&value));

            let mut values = before;
            with_table(&mut values, |table| assert!(table.set_value(position, value).is_err()));
            prop_assert_eq!(values, before);
        }

        #[test]
        fn set_values_replaces_everything(before in any_table(), after in any_table()) {
            let mut values = before;
            with_table(&mut values, |table| table.set_values(&after).unwrap());
            prop_assert_eq!(values, after);
        }

        #[test]
        fn set_values_is_all_or_nothing(
            before in any_table(),
            mut candidate in prop::collection::vec(in_range(), 0..512),
            bad in prop::option::of((any::<prop::sample::Index>(), out_of_range())),
        ) {
            prop_assume!(candidate.len() != TABLE_LEN || bad.is_some());

            if let Some((index, value)) = bad {
                if !candidate.is_empty() {
                    let position = index.index(candidate.len());
                    candidate[position] = value;
                }
            }

            let mut values = before;
            with_table(&mut values, |table| assert!(table.set_values(&candidate).is_err()));
            prop_assert_eq!(values, before);
        }
    }
}

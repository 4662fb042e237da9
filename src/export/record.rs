use std::collections::BTreeMap;
use apache_avro::Schema;
use apache_avro::schema::RecordSchema;
use apache_avro::types::Value;
use super::Error;

/// A single record value that is wiped and refilled for every flow.
///
/// Setters address fields by name. A name missing from the schema, or a
/// value of the wrong type, means the code and the compiled-in schema
/// disagree, so setters panic rather than drop data.
pub struct Record {
    value:  Value,
    kinds:  Vec<Kind>,
    lookup: BTreeMap<String, usize>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Kind {
    Required(Type),
    Optional(Type),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Type {
    Boolean,
    Int,
    Long,
    Double,
    String,
}

impl Record {
    pub fn new(schema: &Schema) -> Result<Self, Error> {
        let RecordSchema { fields, lookup, .. } = match schema {
            Schema::Record(record) => record,
            other                  => return Err(schema_error("not a record", other)),
        };

        let kinds = fields.iter().map(|f| Kind::new(&f.schema)).collect::<Result<Vec<_>, _>>()?;
        let value = Value::Record(fields.iter().zip(&kinds).map(|(f, kind)| {
            (f.name.clone(), kind.empty())
        }).collect());

        Ok(Self {
            value:  value,
            kinds:  kinds,
            lookup: lookup.clone(),
        })
    }

    /// Reset optional fields to their null branch and required fields
    /// to zero.
    pub fn wipe(&mut self) {
        for ((_, value), kind) in fields(&mut self.value).iter_mut().zip(&self.kinds) {
            match (kind, value) {
                (Kind::Optional(_), Value::Union(index, branch)) => {
                    *index   = 0;
                    **branch = Value::Null;
                },
                (kind, value) => *value = kind.empty(),
            }
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_long(&mut self, name: &str, value: i64) {
        self.set(name, Value::Long(value));
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.set(name, Value::Int(value));
    }

    pub fn set_boolean(&mut self, name: &str, value: bool) {
        self.set(name, Value::Boolean(value));
    }

    pub fn set_string(&mut self, name: &str, value: &str) {
        self.set(name, Value::String(value.to_owned()));
    }

    pub fn set_long_union(&mut self, name: &str, value: i64) {
        self.set_union(name, Value::Long(value));
    }

    pub fn set_int_union(&mut self, name: &str, value: i32) {
        self.set_union(name, Value::Int(value));
    }

    pub fn set_double_union(&mut self, name: &str, value: f64) {
        self.set_union(name, Value::Double(value));
    }

    pub fn set_string_union(&mut self, name: &str, value: &str) {
        self.set_union(name, Value::String(value.to_owned()));
    }

    fn set(&mut self, name: &str, value: Value) {
        let (slot, kind) = self.slot(name);
        match kind {
            Kind::Required(t) if t.accepts(&value) => *slot = value,
            _ => panic!("field '{}' is {:?}, cannot set {:?}", name, kind, value),
        }
    }

    fn set_union(&mut self, name: &str, value: Value) {
        let (slot, kind) = self.slot(name);
        match kind {
            Kind::Optional(t) if t.accepts(&value) => *slot = Value::Union(1, Box::new(value)),
            _ => panic!("field '{}' is {:?}, cannot set {:?}", name, kind, value),
        }
    }

    fn slot(&mut self, name: &str) -> (&mut Value, Kind) {
        let index = match self.lookup.get(name) {
            Some(index) => *index,
            None        => panic!("field '{}' missing from flow schema", name),
        };
        let kind = self.kinds[index];
        (&mut fields(&mut self.value)[index].1, kind)
    }
}

impl Kind {
    fn new(schema: &Schema) -> Result<Self, Error> {
        match schema {
            Schema::Union(union) => match union.variants() {
                [Schema::Null, other] => Ok(Kind::Optional(Type::new(other)?)),
                _                     => Err(schema_error("unsupported union", schema)),
            },
            other => Ok(Kind::Required(Type::new(other)?)),
        }
    }

    fn empty(&self) -> Value {
        match self {
            Kind::Required(t) => t.zero(),
            Kind::Optional(_) => Value::Union(0, Box::new(Value::Null)),
        }
    }
}

impl Type {
    fn new(schema: &Schema) -> Result<Self, Error> {
        Ok(match schema {
            Schema::Boolean => Type::Boolean,
            Schema::Int     => Type::Int,
            Schema::Long    => Type::Long,
            Schema::Double  => Type::Double,
            Schema::String  => Type::String,
            other           => return Err(schema_error("unsupported type", other)),
        })
    }

    fn zero(&self) -> Value {
        match self {
            Type::Boolean => Value::Boolean(false),
            Type::Int     => Value::Int(0),
            Type::Long    => Value::Long(0),
            Type::Double  => Value::Double(0.0),
            Type::String  => Value::String(String::new()),
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        matches!((self, value),
            (Type::Boolean, Value::Boolean(_)) |
            (Type::Int,     Value::Int(_))     |
            (Type::Long,    Value::Long(_))    |
            (Type::Double,  Value::Double(_))  |
            (Type::String,  Value::String(_))
        )
    }
}

fn fields(value: &mut Value) -> &mut Vec<(String, Value)> {
    match value {
        Value::Record(fields) => fields,
        _                     => unreachable!(),
    }
}

fn schema_error(msg: &str, schema: &Schema) -> Error {
    Error::Schema(format!("{}: {:?}", msg, schema))
}

//! Core identifiers and the closed symbol-kind / link-fragment taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a symbol in the table's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

/// Position of a namespace in the table's namespace list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceId(pub u32);

impl SymbolId {
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Index into a `Vec` ordered like the table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl NamespaceId {
    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Every kind of introspected symbol that can be documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Alias,
    Bitfield,
    Callback,
    Class,
    ClassMethod,
    Constant,
    Ctor,
    Domain,
    Enum,
    Function,
    FunctionMacro,
    Interface,
    Method,
    Property,
    Record,
    Signal,
    TypeFunc,
    Union,
    Vfunc,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 19] = [
        SymbolKind::Alias,
        SymbolKind::Bitfield,
        SymbolKind::Callback,
        SymbolKind::Class,
        SymbolKind::ClassMethod,
        SymbolKind::Constant,
        SymbolKind::Ctor,
        SymbolKind::Domain,
        SymbolKind::Enum,
        SymbolKind::Function,
        SymbolKind::FunctionMacro,
        SymbolKind::Interface,
        SymbolKind::Method,
        SymbolKind::Property,
        SymbolKind::Record,
        SymbolKind::Signal,
        SymbolKind::TypeFunc,
        SymbolKind::Union,
        SymbolKind::Vfunc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Alias => "alias",
            SymbolKind::Bitfield => "bitfield",
            SymbolKind::Callback => "callback",
            SymbolKind::Class => "class",
            SymbolKind::ClassMethod => "class_method",
            SymbolKind::Constant => "constant",
            SymbolKind::Ctor => "ctor",
            SymbolKind::Domain => "domain",
            SymbolKind::Enum => "enum",
            SymbolKind::Function => "function",
            SymbolKind::FunctionMacro => "function_macro",
            SymbolKind::Interface => "interface",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Record => "record",
            SymbolKind::Signal => "signal",
            SymbolKind::TypeFunc => "type_func",
            SymbolKind::Union => "union",
            SymbolKind::Vfunc => "vfunc",
        }
    }

    /// Prefix of the generated page name, e.g. `flags` in `flags.BindingFlags.html`.
    pub fn href_prefix(&self) -> &'static str {
        match self {
            SymbolKind::Alias => "alias",
            SymbolKind::Bitfield => "flags",
            SymbolKind::Callback => "callback",
            SymbolKind::Class => "class",
            SymbolKind::ClassMethod => "class_method",
            SymbolKind::Constant => "const",
            SymbolKind::Ctor => "ctor",
            SymbolKind::Domain => "error",
            SymbolKind::Enum => "enum",
            SymbolKind::Function | SymbolKind::FunctionMacro => "func",
            SymbolKind::Interface => "iface",
            SymbolKind::Method => "method",
            SymbolKind::Property => "property",
            SymbolKind::Record => "struct",
            SymbolKind::Signal => "signal",
            SymbolKind::TypeFunc => "type_func",
            SymbolKind::Union => "union",
            SymbolKind::Vfunc => "vfunc",
        }
    }

    /// Kinds that name a C type rather than a callable or a member.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            SymbolKind::Alias
                | SymbolKind::Bitfield
                | SymbolKind::Class
                | SymbolKind::Domain
                | SymbolKind::Enum
                | SymbolKind::Interface
                | SymbolKind::Record
                | SymbolKind::Union
        )
    }

    /// Kinds that always belong to an owning type.
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            SymbolKind::ClassMethod
                | SymbolKind::Ctor
                | SymbolKind::Method
                | SymbolKind::Property
                | SymbolKind::Signal
                | SymbolKind::TypeFunc
                | SymbolKind::Vfunc
        )
    }

    /// Kinds whose symbols carry enumeration members.
    pub fn has_members(&self) -> bool {
        matches!(
            self,
            SymbolKind::Bitfield | SymbolKind::Domain | SymbolKind::Enum
        )
    }

    /// Separator between owner and member in labels and rendering text.
    pub fn member_separator(&self) -> &'static str {
        match self {
            SymbolKind::Signal => "::",
            SymbolKind::Property => ":",
            _ => ".",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymbolKind::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or("Unknown symbol kind")
    }
}

/// Keyword in front of the `@` of a link token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fragment {
    Alias,
    Callback,
    Class,
    Const,
    Ctor,
    Enum,
    Error,
    Flags,
    Func,
    Id,
    Iface,
    Method,
    Property,
    Signal,
    Struct,
    Type,
    Union,
    Vfunc,
}

const ALIAS: &[SymbolKind] = &[SymbolKind::Alias];
const CALLBACK: &[SymbolKind] = &[SymbolKind::Callback];
const CLASS: &[SymbolKind] = &[SymbolKind::Class];
const CONST: &[SymbolKind] = &[SymbolKind::Constant];
const CTOR: &[SymbolKind] = &[SymbolKind::Ctor];
const ENUM: &[SymbolKind] = &[SymbolKind::Enum];
const ERROR: &[SymbolKind] = &[SymbolKind::Domain];
const FLAGS: &[SymbolKind] = &[SymbolKind::Bitfield];
const FUNC: &[SymbolKind] = &[
    SymbolKind::Function,
    SymbolKind::TypeFunc,
    SymbolKind::FunctionMacro,
];
const ID: &[SymbolKind] = &[SymbolKind::Function, SymbolKind::Method];
const IFACE: &[SymbolKind] = &[SymbolKind::Interface];
const METHOD: &[SymbolKind] = &[SymbolKind::Method, SymbolKind::ClassMethod];
const PROPERTY: &[SymbolKind] = &[SymbolKind::Property];
const SIGNAL: &[SymbolKind] = &[SymbolKind::Signal];
const STRUCT: &[SymbolKind] = &[SymbolKind::Record, SymbolKind::Union];
const TYPE: &[SymbolKind] = &[
    SymbolKind::Alias,
    SymbolKind::Bitfield,
    SymbolKind::Callback,
    SymbolKind::Class,
    SymbolKind::Domain,
    SymbolKind::Enum,
    SymbolKind::Interface,
    SymbolKind::Record,
    SymbolKind::Union,
];
const UNION: &[SymbolKind] = &[SymbolKind::Union];
const VFUNC: &[SymbolKind] = &[SymbolKind::Vfunc];

impl Fragment {
    pub const ALL: [Fragment; 18] = [
        Fragment::Alias,
        Fragment::Callback,
        Fragment::Class,
        Fragment::Const,
        Fragment::Ctor,
        Fragment::Enum,
        Fragment::Error,
        Fragment::Flags,
        Fragment::Func,
        Fragment::Id,
        Fragment::Iface,
        Fragment::Method,
        Fragment::Property,
        Fragment::Signal,
        Fragment::Struct,
        Fragment::Type,
        Fragment::Union,
        Fragment::Vfunc,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Fragment::Alias => "alias",
            Fragment::Callback => "callback",
            Fragment::Class => "class",
            Fragment::Const => "const",
            Fragment::Ctor => "ctor",
            Fragment::Enum => "enum",
            Fragment::Error => "error",
            Fragment::Flags => "flags",
            Fragment::Func => "func",
            Fragment::Id => "id",
            Fragment::Iface => "iface",
            Fragment::Method => "method",
            Fragment::Property => "property",
            Fragment::Signal => "signal",
            Fragment::Struct => "struct",
            Fragment::Type => "type",
            Fragment::Union => "union",
            Fragment::Vfunc => "vfunc",
        }
    }

    /// Kinds a reference with this fragment may resolve to.
    pub fn candidate_kinds(&self) -> &'static [SymbolKind] {
        match self {
            Fragment::Alias => ALIAS,
            Fragment::Callback => CALLBACK,
            Fragment::Class => CLASS,
            Fragment::Const => CONST,
            Fragment::Ctor => CTOR,
            Fragment::Enum => ENUM,
            Fragment::Error => ERROR,
            Fragment::Flags => FLAGS,
            Fragment::Func => FUNC,
            Fragment::Id => ID,
            Fragment::Iface => IFACE,
            Fragment::Method => METHOD,
            Fragment::Property => PROPERTY,
            Fragment::Signal => SIGNAL,
            Fragment::Struct => STRUCT,
            Fragment::Type => TYPE,
            Fragment::Union => UNION,
            Fragment::Vfunc => VFUNC,
        }
    }

    pub fn accepts(&self, kind: SymbolKind) -> bool {
        self.candidate_kinds().contains(&kind)
    }

    /// Fragments whose two-component paths may address an enumeration member.
    pub fn targets_enumeration(&self) -> bool {
        matches!(
            self,
            Fragment::Enum | Fragment::Error | Fragment::Flags | Fragment::Type
        )
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Fragment {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fragment::ALL
            .iter()
            .find(|fragment| fragment.keyword() == s)
            .copied()
            .ok_or("Unknown fragment")
    }
}

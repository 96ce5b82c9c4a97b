macro_rules! keywords {
    ($($variant:ident => $name:literal,)*) => {
        /// Reserved words of the shader language proper.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

keywords! {
    // Reserved for future use
    Auto => "auto",
    Catch => "catch",
    Char => "char",
    Class => "class",
    ConstCast => "const_cast",
    Default => "default",
    Delete => "delete",
    DynamicCast => "dynamic_cast",
    Enum => "enum",
    Explicit => "explicit",
    Friend => "friend",
    Goto => "goto",
    Long => "long",
    Mutable => "mutable",
    Namespace => "namespace",
    New => "new",
    Operator => "operator",
    Private => "private",
    Public => "public",
    Protected => "protected",
    ReinterpretCast => "reinterpret_cast",
    Short => "short",
    Signed => "signed",
    Sizeof => "sizeof",
    StaticCast => "static_cast",
    Template => "template",
    Typename => "typename",
    This => "this",
    Try => "try",
    Union => "union",
    Unsigned => "unsigned",
    Virtual => "virtual",

    // Flow control
    If => "if",
    Else => "else",
    For => "for",
    Do => "do",
    While => "while",
    Switch => "switch",
    Case => "case",
    Break => "break",
    Continue => "continue",
    Return => "return",

    // Attributes
    Unroll => "unroll",
    Loop => "loop",
    Fastopt => "fastopt",
    AllowUavCondition => "allow_uav_condition",
    Flatten => "flatten",
    Branch => "branch",
    ForceCase => "forcecase",
    Call => "call",

    // Declarations and storage
    Typedef => "typedef",
    Struct => "struct",
    Interface => "interface",
    Cbuffer => "cbuffer",
    Tbuffer => "tbuffer",
    Register => "register",
    Discard => "discard",
    Inline => "inline",
    Static => "static",
    Extern => "extern",
    Volatile => "volatile",
    In => "in",
    Inout => "inout",
    Out => "out",
    Uniform => "uniform",
    Unorm => "unorm",
    Snorm => "snorm",
    Const => "const",
    PackOffset => "packoffset",
    RowMajor => "row_major",
    ColumnMajor => "column_major",

    // Geometry shader primitives
    Point => "point",
    Line => "line",
    LineAdj => "lineadj",
    Triangle => "triangle",
    TriangleAdj => "triangleadj",

    // Interpolation and sharing modifiers
    Linear => "linear",
    NoPerspective => "noperspective",
    NoInterpolation => "nointerpolation",
    Centroid => "centroid",
    Sample => "sample",
    Precise => "precise",
    Shared => "shared",
    GroupShared => "groupshared",
    ClipPlanes => "clipplanes",
    MaxVertexCount => "maxvertexcount",

    // Effect framework
    Pass => "pass",
    Technique => "technique",
    Technique10 => "technique10",
    Technique11 => "technique11",
    Compile => "compile",
    CompileShader => "CompileShader",
    VertexShader => "VertexShader",
    HullShader => "HullShader",
    DomainShader => "DomainShader",
    GeometryShader => "GeometryShader",
    PixelShader => "PixelShader",
    ComputeShader => "ComputeShader",
    SetVertexShader => "SetVertexShader",
    SetHullShader => "SetHullShader",
    SetDomainShader => "SetDomainShader",
    SetGeometryShader => "SetGeometryShader",
    SetPixelShader => "SetPixelShader",
    SetComputeShader => "SetComputeShader",

    // Resource types
    Texture => "texture",
    Texture1D => "Texture1D",
    Texture1DArray => "Texture1DArray",
    Texture2D => "Texture2D",
    Texture2DArray => "Texture2DArray",
    Texture3D => "Texture3D",
    TextureCube => "TextureCube",
    Sampler => "sampler",
    Sampler1D => "sampler1D",
    Sampler2D => "sampler2D",
    Sampler3D => "sampler3D",
    SamplerCube => "samplerCUBE",
    SamplerStateLegacy => "sampler_state",
    SamplerState => "SamplerState",
    SamplerComparisonState => "SamplerComparisonState",

    // Scalar and aggregate types
    Vector => "vector",
    Matrix => "matrix",
    Buffer => "buffer",
    Void => "void",
    Bool => "bool",
    Int => "int",
    Uint => "uint",
    Dword => "dword",
    Half => "half",
    Float => "float",
    Double => "double",
}

#[test]
fn every_keyword_round_trips() {
    for keyword in Keyword::ALL.iter().copied() {
        assert_eq!(Keyword::from_name(keyword.name()), Some(keyword));
    }
}

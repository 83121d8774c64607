//! PeopleCode source fixtures shared across the integration suite.

// A two-level widget package: PanelWidget extends BaseWidget. Stored under
// ADS:UI in the seeded store.

pub const BASE_WIDGET: &str = r#"class BaseWidget
   method BaseWidget();
   method Paint();
   method Resize(&w As number, &h As number);
   property string Label get set;
protected
   instance number &width, &height;
end-class;

method BaseWidget
end-method;

method Paint
   %This.Resize(&width, &height);
end-method;

method Resize
   &width = &w;
   &height = &h;
end-method;

get Label
   Return "base";
end-get;

set Label
end-set;
"#;

pub const PANEL_WIDGET: &str = r#"import ADS:UI:BaseWidget;

class PanelWidget extends ADS:UI:BaseWidget
   method PanelWidget();
   method Dock();
end-class;

method PanelWidget
   %Super.Paint();
end-method;

method Dock
end-method;
"#;

// A function library stored at FUNCLIB_ADS.UTIL_FLD.FieldFormula.

pub const FUNCLIB_UTILS: &str = r#"Function FormatName(&first As string, &last As string) Returns string
   Return &last | ", " | &first;
End-Function;

Function CheckAccess(&oprid As string) Returns boolean
   If &oprid = "PS" Then
      Return True;
   End-If;
   Return False;
End-Function;
"#;
